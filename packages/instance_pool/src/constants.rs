pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - the pool can no longer \
    guarantee that it holds at most one instance per key";
