//! Integration tests for vulpine

use vulpine::scenario::final_report;
use vulpine::{Scenario, Settings, World};

fn run_report(text: &str) -> String {
    let scenario = Scenario::parse(text).unwrap();
    let mut world = World::from_scenario(&scenario);
    world.run(scenario.generations);
    assert_eq!(world.check_consistency(), Ok(()));
    final_report(&world)
}

#[test]
fn test_full_simulation_cycle() {
    let mut settings = Settings::default();
    settings.seeding.rabbits = 50;
    settings.seeding.foxes = 10;
    settings.seeding.rocks = 15;

    let mut world = World::random_with_seed(&settings, 12345);

    for _ in 0..100 {
        world.step();
        assert_eq!(world.check_consistency(), Ok(()));
    }
    assert_eq!(world.generation, 100);

    for animal in world.rabbits.alive().chain(world.foxes.alive()) {
        assert!(world.grid.in_bounds(animal.x, animal.y));
    }
}

#[test]
fn test_two_runs_produce_byte_identical_reports() {
    let settings = Settings::default();
    let scenario = Scenario::random(&settings, 777);
    let text = scenario.to_text();

    let first = run_report(&text);
    let second = run_report(&text);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_lone_rabbit_moves_south_by_formula() {
    // 3x3 grid, rabbit at row 1 col 1, one generation. Four empty
    // neighbors, destination index (0 + 1 + 1) % 4 = 2 -> third entry of
    // the N, E, S, W list, i.e. row 2 col 1.
    let report = run_report("2 1 1 1 3 3 1 RABBIT 1 1");
    assert_eq!(report, "2 1 1 0 3 3 1\nRABBIT 2 1\n");
}

#[test]
fn test_fox_eats_cornered_rabbit() {
    // The rock blocks the rabbit's only empty neighbor, so it stays put;
    // the fox walks onto it and eats it.
    let scenario = Scenario::parse("9 9 9 1 2 2 3 RABBIT 0 0 FOX 0 1 ROCK 1 0").unwrap();
    let mut world = World::from_scenario(&scenario);
    world.run(1);

    assert_eq!(world.rabbits.alive_count(), 0);
    assert_eq!(world.foxes.alive_count(), 1);
    assert_eq!(world.foxes.get(0).pos(), (0, 0));
    assert_eq!(world.foxes.get(0).hunger, 0);
    assert_eq!(final_report(&world), "9 9 9 0 2 2 2\nROCK 1 0\nFOX 0 0\n");
}

#[test]
fn test_starvation_boundary() {
    // Starvation threshold 2, fox alone on a 1x1 grid: hunger reaches 1
    // after the first generation (survives), 2 after the second (dies).
    let scenario = Scenario::parse("9 9 2 2 1 1 1 FOX 0 0").unwrap();

    let mut world = World::from_scenario(&scenario);
    world.run(1);
    assert_eq!(world.foxes.alive_count(), 1);
    assert_eq!(world.foxes.get(0).hunger, 1);

    world.run(1);
    assert_eq!(world.foxes.alive_count(), 0);
    assert_eq!(world.stats.starvation_deaths, 1);
}

#[test]
fn test_prey_collision_tie_break_prefers_lower_index() {
    // 1x3 strip: both rabbits' only empty neighbor is the middle cell and
    // both carry age 0. The first-listed rabbit survives and moves.
    let scenario = Scenario::parse("9 9 9 1 1 3 2 RABBIT 0 0 RABBIT 0 2").unwrap();
    let mut world = World::from_scenario(&scenario);
    world.run(1);

    assert!(world.rabbits.get(0).alive);
    assert!(!world.rabbits.get(1).alive);
    assert_eq!(world.rabbits.get(0).pos(), (1, 0));
    assert_eq!(final_report(&world), "9 9 9 0 1 3 1\nRABBIT 0 1\n");
}

#[test]
fn test_rocks_survive_into_report_in_input_order() {
    let report = run_report("1 1 1 0 2 2 2 ROCK 1 1 ROCK 0 1");
    assert_eq!(report, "1 1 1 0 2 2 2\nROCK 1 1\nROCK 0 1\n");
}

#[test]
fn test_report_groups_species_in_store_order() {
    let report = run_report("9 9 9 0 3 3 4 FOX 2 2 RABBIT 0 0 ROCK 1 1 RABBIT 0 2");
    assert_eq!(
        report,
        "9 9 9 0 3 3 4\nROCK 1 1\nRABBIT 0 0\nRABBIT 0 2\nFOX 2 2\n"
    );
}

#[test]
fn test_population_never_occupies_same_cell() {
    let mut settings = Settings::default();
    settings.world.rows = 12;
    settings.world.cols = 12;
    settings.seeding.rocks = 10;
    settings.seeding.rabbits = 30;
    settings.seeding.foxes = 8;
    let mut world = World::random_with_seed(&settings, 31337);

    for _ in 0..60 {
        world.step();

        let mut seen = std::collections::HashSet::new();
        for animal in world.rabbits.alive().chain(world.foxes.alive()) {
            assert!(seen.insert(animal.pos()), "two animals at {:?}", animal.pos());
        }
        for &rock in &world.rocks {
            assert!(seen.insert(rock), "animal on rock at {:?}", rock);
        }
    }
}

#[test]
fn test_offspring_do_not_act_in_birth_generation() {
    // Lone rabbit on a 1x2 strip at the reproduction threshold: it moves
    // East, the newborn fills the vacated cell. If the newborn acted this
    // generation it would have moved as well; both cells stay occupied.
    let scenario = Scenario::parse("1 9 9 1 1 2 1 RABBIT 0 0").unwrap();
    let mut world = World::from_scenario(&scenario);
    world.rabbits.get_mut(0).breed_age = 1;
    world.run(1);

    assert_eq!(world.rabbits.alive_count(), 2);
    assert_eq!(world.rabbits.get(0).pos(), (1, 0));
    assert_eq!(world.rabbits.get(1).pos(), (0, 0));
    assert_eq!(world.rabbits.get(1).breed_age, 0);
}
