use std::env;
use std::io::{self, BufRead};
use std::{process, thread};

use crossbeam_channel::{unbounded, Sender};
use log::{debug, info, LevelFilter};

use sortvis::{Algorithm, Config, Outcome, PlaybackHandle, Session, TerminalSink, ThemeSwitch};

const USAGE: &str = "Usage: sortvis <bubble|selection|insertion|merge|quick|heap> [size] [max_value] [speed]\n\
                     Set SEED=<u64> for a reproducible sequence.";

enum Input {
    NewRun,
    Select(Algorithm),
    Quit,
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let mut args = env::args();
    args.next();
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}\n{}", err, USAGE);
            process::exit(1);
        }
    };

    let theme = ThemeSwitch::default();
    let (mut session, handle) = Session::new(config);
    let (tx, rx) = unbounded();
    spawn_input_reader(handle, theme.clone(), tx);

    let mut sink = TerminalSink::stdout(theme);
    loop {
        let report = session.start(&mut sink);
        match report.outcome {
            Outcome::Completed => println!(
                "{} done: {} comparisons, {} swaps. [n]ew run, algorithm name to switch, [q]uit",
                session.config().algorithm, report.metrics.comparisons, report.metrics.swaps
            ),
            Outcome::Cancelled => println!("Stopped. [n]ew run, algorithm name to switch, [q]uit"),
        }

        loop {
            match rx.recv() {
                Ok(Input::NewRun) => break,
                Ok(Input::Select(algorithm)) => {
                    session.set_algorithm(algorithm);
                    let complexity = algorithm.complexity();
                    println!("{}: {} | space: {}", algorithm, complexity.time(), complexity.space);
                }
                Ok(Input::Quit) | Err(_) => {
                    info!("Quitting");
                    return;
                }
            }
        }
    }
}

/// Reads one command per line from stdin. Playback commands go straight to
/// the active run; everything else is queued for the session loop.
fn spawn_input_reader(handle: PlaybackHandle, theme: ThemeSwitch, tx: Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let input = line.trim();
            debug!("Input: {:?}", input);
            match input {
                "p" => handle.pause(),
                "r" => handle.resume(),
                "s" => handle.stop(),
                "t" => {
                    let theme = theme.toggle();
                    debug!("Theme switched to {:?}", theme);
                }
                "n" => {
                    handle.stop();
                    if tx.send(Input::NewRun).is_err() {
                        return;
                    }
                }
                "q" => {
                    handle.stop();
                    let _ = tx.send(Input::Quit);
                    return;
                }
                "" => {}
                other => match other.parse::<Algorithm>() {
                    Ok(algorithm) => {
                        if tx.send(Input::Select(algorithm)).is_err() {
                            return;
                        }
                    }
                    Err(err) => eprintln!("{}", err),
                },
            }
        }
        // stdin closed: a running run finishes, a paused one is stopped
        // because no handle is left to resume it
        drop(handle);
        let _ = tx.send(Input::Quit);
    });
}
