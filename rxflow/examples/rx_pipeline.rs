//! Reactive pipeline example
//!
//! Builds a few observable chains and moves them between schedulers.
//!
//! Usage:
//!   cargo run --example rx_pipeline

use futures::StreamExt;
use rxflow::{
    ComputationScheduler, Disposable, IoScheduler, Observable, RxError, SchedulerConfig,
    SingleThreadScheduler,
};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::info;

fn current_thread() -> String {
    thread::current().name().unwrap_or("unnamed").to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("rxflow pipeline example v{}", env!("CARGO_PKG_VERSION"));

    // 1. Synchronous chain
    println!("1. filter + map");
    let numbers = Observable::create(|emitter| {
        for i in 1..=6 {
            emitter.next(i);
        }
        emitter.complete();
    });

    numbers
        .filter(|x| x % 2 == 0)
        .map(|x| format!("even:{}", x))
        .subscribe_all(
            |value| println!("   {}", value),
            |err| eprintln!("   error: {}", err),
            || println!("   done"),
        );

    // 2. flat_map fan-out
    println!("\n2. flat_map");
    numbers
        .filter(|x| *x <= 2)
        .flat_map(|x| {
            Observable::create(move |emitter| {
                emitter.next(x * 100);
                emitter.next(x * 100 + 1);
                emitter.complete();
            })
        })
        .subscribe_fn(|value| println!("   {}", value), |err| eprintln!("   error: {}", err));

    // 3. Produce on an IO worker, observe on a single thread
    println!("\n3. subscribe_on + observe_on");
    let config = SchedulerConfig::new().with_thread_name_prefix("demo");
    let io = IoScheduler::with_config(&config)?;
    let single = SingleThreadScheduler::with_config(&config)?;

    let (done_tx, done_rx) = mpsc::channel();
    let _subscription = Observable::create(|emitter| {
        println!("   producing on {}", current_thread());
        for i in 1..=3 {
            emitter.next(i);
        }
        emitter.complete();
    })
    .map(|x| x * x)
    .subscribe_on(io)
    .observe_on(single)
    .subscribe_all(
        |value| println!("   got {} on {}", value, current_thread()),
        |err| eprintln!("   error: {}", err),
        move || {
            let _ = done_tx.send(());
        },
    );
    done_rx.recv_timeout(Duration::from_secs(5))?;

    // 4. Cancelling an endless producer
    println!("\n4. dispose");
    let ticks = Observable::create(|emitter| {
        let mut tick = 0u64;
        while !emitter.is_disposed() {
            emitter.next(tick);
            tick += 1;
            thread::sleep(Duration::from_millis(20));
        }
        println!("   producer stopped after {} ticks", tick);
    });

    let subscription = ticks
        .subscribe_on(ComputationScheduler::new())
        .subscribe_fn(|tick| println!("   tick {}", tick), |_| {});
    tokio::time::sleep(Duration::from_millis(100)).await;
    subscription.dispose();
    tokio::time::sleep(Duration::from_millis(50)).await;

    // 5. Errors and the async bridge
    println!("\n5. into_stream");
    let parsed = Observable::create(|emitter| {
        for raw in ["1", "2", "three", "4"] {
            emitter.next(raw.to_string());
        }
        emitter.complete();
    })
    .try_map(|raw: String| raw.parse::<i32>());

    let mut stream = parsed.into_stream();
    while let Some(event) = stream.next().await {
        match event {
            Ok(value) => println!("   parsed {}", value),
            Err(RxError::Operator(err)) => println!("   stopped: {}", err),
            Err(err) => return Err(err.into()),
        }
    }

    println!("\n✅ Example completed");
    Ok(())
}
