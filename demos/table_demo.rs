//! Table demo: a few bots play until they have all left.
//!
//! Run with `RUST_LOG=debug cargo run --example table_demo` to watch every
//! phase; `trace` also shows each card.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bjtable::{Dealer, FlatBettor, PlayerActor, Table, TableOptions};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let options = TableOptions::default().with_phase_timeout(Duration::from_secs(5));
    let table = Arc::new(Table::new(options));

    let mut handles = Vec::new();
    for rounds in [2, 4, 6] {
        match PlayerActor::spawn(&table, FlatBettor::new(rounds)) {
            Ok((_, handle)) => handles.push(handle),
            Err(err) => eprintln!("could not seat player: {err}"),
        }
    }

    let dealer = Dealer::new(Arc::clone(&table), seed);
    let dealer = thread::spawn(move || dealer.run());

    match dealer.join() {
        Ok(Ok(rounds)) => println!("dealer played {rounds} rounds"),
        Ok(Err(err)) => eprintln!("dealer stopped: {err}"),
        Err(_) => eprintln!("dealer thread panicked"),
    }

    for handle in handles {
        if let Ok(summary) = handle.join() {
            println!(
                "{} played {} rounds, last bet {}",
                summary.id, summary.rounds_played, summary.last_bet
            );
        }
    }
}
