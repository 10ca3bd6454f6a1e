use clap::Parser;
use log::{error, info};
use madlib::{Clock, DEFAULT_PATTERN, Timer, datef};
use std::error::Error;
use threadpool::ThreadPool;

#[derive(Parser, Debug)]
#[command(name = "madlib-ticker", about = "Polls interval timers on the real clock and logs each firing")]
struct Args {
    /// Timer interval in milliseconds; repeat for several schedules.
    #[arg(long = "every", required = true, value_parser = clap::value_parser!(u64).range(1..))]
    every: Vec<u64>,

    /// Firings per schedule before it stops.
    #[arg(long, default_value_t = 5)]
    fires: u32,

    /// Sleep between checks in milliseconds.
    #[arg(long, default_value_t = 10)]
    poll: u64,

    /// Re-arm from the check time instead of the fixed grid.
    #[arg(long)]
    drift: bool,

    /// Print timestamps in the local time zone.
    #[arg(long)]
    local: bool,

    /// Worker threads; defaults to one per schedule.
    #[arg(long)]
    workers: Option<usize>,
}

/// Run one schedule to completion on its own real clock.
fn run_schedule(every: u64, fires: u32, poll: u64, drift: bool, local: bool) {
    let clock = Clock::real();
    let mut timer = if drift {
        Timer::drifting(&clock, every)
    } else {
        Timer::new(&clock, every)
    };

    let mut fired = 0;
    while fired < fires {
        if timer.check() {
            fired += 1;
            match datef(clock.now(), DEFAULT_PATTERN, true, local) {
                Ok(stamp) => info!("[{}ms] fire {}/{} at {}", every, fired, fires, stamp),
                Err(e) => error!("[{}ms] fire {}/{}: {}", every, fired, fires, e),
            }
        }
        clock.delay(poll);
    }

    info!("[{}ms] done", every);
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let workers = args.workers.unwrap_or(args.every.len()).max(1);
    info!(
        "running {} schedule(s) on {} worker(s), {} re-arming",
        args.every.len(),
        workers,
        if args.drift { "drift" } else { "fixed-phase" }
    );

    let pool = ThreadPool::new(workers);
    for every in args.every {
        let (fires, poll, drift, local) = (args.fires, args.poll, args.drift, args.local);
        pool.execute(move || run_schedule(every, fires, poll, drift, local));
    }
    pool.join();

    if pool.panic_count() > 0 {
        return Err(format!("{} schedule(s) panicked", pool.panic_count()).into());
    }
    Ok(())
}
