pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - a thread panicked while \
    modifying the registry";
