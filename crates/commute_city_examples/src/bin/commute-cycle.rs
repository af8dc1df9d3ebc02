use commute_city::prelude::*;
use commute_city_examples::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

const TICK: f32 = 0.1;
const CYCLES: u64 = 3;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = CityConfig::default().with_agent_count(25);
    let generator = CityGenerator::try_new(config)?;
    let city = generator.generate(&mut StdRng::seed_from_u64(1))?;

    let mut scheduler = CommuteScheduler::with_config(
        city.roster.clone(),
        SchedulerConfig::default().with_stall_warning_ticks(50_000),
    );
    let mut world = SimulatedWorld::new(3.5);
    let mut sink = FnSink::new(|event: CityEvent| {
        if let CityEvent::WaveDispatched { phase, agents } = event {
            info!("{phase}: {agents} agents on the road.");
        }
    });

    let mut ticks = 0u64;
    while scheduler.completed_cycles() < CYCLES {
        scheduler.tick_with_events(&mut world, &mut sink);
        world.advance(TICK);
        ticks += 1;
    }

    println!(
        "{} cycles in {} ticks ({:.1} simulated seconds), {} arrivals",
        scheduler.completed_cycles(),
        ticks,
        ticks as f32 * TICK,
        world.arrived()
    );
    Ok(())
}
