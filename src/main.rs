#![allow(non_snake_case)]
use adomian_lane_emden::ADM::ADM_task::{AdmTask, TaskFile, TaskOutcome, render_outcome, run_batch};
use adomian_lane_emden::Utils::logger::init_logger;
use log::{error, info};
use std::env;

/// usage: adomian_lane_emden [TASK_FILE.toml] [--log <level>] [--parallel]
fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut task_path: Option<String> = None;
    let mut loglevel: Option<String> = None;
    let mut parallel = false;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--log" => loglevel = iter.next().cloned(),
            "--parallel" => parallel = true,
            other => task_path = Some(other.to_string()),
        }
    }

    let outcomes: Vec<TaskOutcome> = match task_path {
        Some(path) => match TaskFile::from_file(&path) {
            Ok(file) => {
                let level = loglevel.unwrap_or_else(|| file.settings.loglevel.clone());
                init_logger(&level, true);
                info!("{} tasks from {}", file.tasks.len(), path);
                file.run()
            }
            Err(err) => {
                init_logger(&loglevel.unwrap_or_else(|| "info".to_string()), false);
                error!("{}", err);
                return;
            }
        },
        None => {
            init_logger(&loglevel.unwrap_or_else(|| "info".to_string()), true);
            run_batch(&AdmTask::default_tasks(), parallel)
        }
    };
    for outcome in &outcomes {
        println!("{}", render_outcome(outcome));
    }
    let solved = outcomes.iter().filter(|o| o.is_solved()).count();
    info!("{} of {} tasks solved", solved, outcomes.len());
}
