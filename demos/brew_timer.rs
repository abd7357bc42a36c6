//! Terminal walk-through of a full iced pour-over brew
//!
//! Run with: cargo run --example brew_timer -- [people] [--fast]
//!
//! `--fast` ticks every 50ms instead of every second.

use iced_pourover::{
    BrewPhase, BrewTimer, Checklist, ChecklistItem, IntervalTickSource, RatioSettings,
    RecipeInputs, RecipePlanner, Result, Transition,
};
use std::io::Write;
use std::time::Duration;
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("iced_pourover=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let fast = args.iter().any(|a| a == "--fast");
    let people = args
        .iter()
        .find_map(|a| a.parse::<u32>().ok())
        .unwrap_or(1);

    let inputs = RecipeInputs::try_by_people(people)?;
    let planner = RecipePlanner::new(RatioSettings::default());
    let plan = planner.plan(&inputs);

    println!("Iced Pour-Over for {}", people);
    println!("=====================\n");
    println!("  Coffee:      {}g", plan.recipe.coffee_grams);
    println!("  Total water: {}g", plan.recipe.total_water_grams);
    println!("  Brew water:  {}g", plan.recipe.brew_water_grams);
    println!("  Ice:         {}g\n", plan.recipe.ice_grams);
    println!(
        "  {} pours of {}g, {}s each ({})",
        plan.bloom.bloom_count,
        plan.bloom.water_per_bloom_grams,
        plan.bloom.bloom_duration_seconds,
        plan.bloom.reason
    );
    println!("  {}\n", plan.bloom.reason.rationale());

    let mut checklist = Checklist::new();
    for item in ChecklistItem::ALL {
        checklist.set(item, true);
        println!("  [x] {}", item.label());
    }
    println!();

    let timer = BrewTimer::default();
    timer.with_controller(|c| c.start_brewing(&checklist, plan.bloom));

    let period = if fast {
        Duration::from_millis(50)
    } else {
        IntervalTickSource::DEFAULT_PERIOD
    };
    let mut updates = timer.subscribe();
    let subscription = timer.attach(IntervalTickSource::new(period));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\n\nStopping...");
                break;
            }
            update = updates.recv() => {
                let update = match update {
                    Ok(update) => update,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("Display fell behind by {} ticks", skipped);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let snapshot = &update.snapshot;
                print!(
                    "\r  Pour {}/{}  {}  {:<40}",
                    snapshot.current_bloom_index + 1,
                    snapshot.bloom_count,
                    snapshot.time_remaining,
                    snapshot.guidance.instruction()
                );
                let _ = std::io::stdout().flush();

                if update.outcome.stir_nudge {
                    println!("\n  >> Stir now!");
                }
                if update.outcome.expired {
                    println!();
                    match timer.with_controller(|c| c.advance()) {
                        Some(Transition::NextBloom { index }) => {
                            println!(
                                "  Pour up to {}g on the scale",
                                plan.bloom.target_scale_grams(index)
                            );
                        }
                        Some(Transition::Phase { to: BrewPhase::Finishing, .. }) => break,
                        _ => {}
                    }
                }
            }
        }
    }

    subscription.cancel();

    if timer.snapshot().phase == BrewPhase::Finishing {
        println!("\nSwirl the carafe over the ice and serve.");
        timer.with_controller(|c| c.advance());
    }
    println!("Final phase: {}", timer.snapshot().phase);

    Ok(())
}
