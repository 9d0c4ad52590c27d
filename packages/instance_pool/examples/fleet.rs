//! Renders a fleet of cars with random colors and positions while only ever creating one
//! shared instance per car type.

use instance_pool::{InstancePool, Placement, Pooled, Vehicle, VehicleKind};
use rand::Rng;
use rand::seq::IndexedRandom;

const COLORS: &[&str] = &[
    "white", "black", "silver", "gray", "red", "blue", "brown", "beige", "yellow", "green",
];

const MIN_POINT: u32 = 0;
const MAX_POINT: u32 = 100;

fn main() {
    tracing_subscriber::fmt().init();

    let pool = InstancePool::<VehicleKind, Vehicle>::new();
    let mut rng = rand::rng();
    let mut cars_rendered: usize = 0;

    for (kind, count) in [
        (VehicleKind::Subcompact, 10),
        (VehicleKind::Compact, 3),
        (VehicleKind::Suv, 5),
    ] {
        for _ in 0..count {
            let car = pool.acquire(kind).expect("every vehicle kind is a valid key");

            let color = COLORS.choose(&mut rng).copied().unwrap_or("white");
            let placement = Placement::new(
                color,
                rng.random_range(MIN_POINT..=MAX_POINT),
                rng.random_range(MIN_POINT..=MAX_POINT),
            );

            println!("{}", car.render(&placement));
            cars_rendered = cars_rendered.saturating_add(1);
        }
    }

    println!("cars rendered: {cars_rendered}");
    println!("cars actually created: {}", pool.len());

    let c4 = pool.acquire(VehicleKind::Subcompact).expect("valid key");
    let c5 = pool.acquire(VehicleKind::Subcompact).expect("valid key");
    let c6 = pool.acquire(VehicleKind::Suv).expect("valid key");

    println!("{} == {}? {}", c4.key(), c5.key(), Pooled::ptr_eq(&c4, &c5));
    println!("{} == {}? {}", c5.key(), c6.key(), Pooled::ptr_eq(&c5, &c6));
}
