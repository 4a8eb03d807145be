use anyhow::Result;
use clap::Parser;

use alienrace::{
    best_times_path, level_path, time_string, Args, BestTimes, Command, FileManager, LevelData,
    LevelIndex,
};

fn list_levels(files: &FileManager) -> Result<()> {
    let index = LevelIndex::from_files(files)?;
    for name in index.levels() {
        println!("{}", name);
    }
    Ok(())
}

fn print_best_times(files: &FileManager, level: &str) -> Result<()> {
    let times = BestTimes::load(files, level)?;
    if times.is_empty() {
        println!("no times saved in {:?}", best_times_path(level));
        return Ok(());
    }
    for (race_id, time) in times.iter() {
        println!("race {}: {} ({})", race_id, time_string(time), time);
    }
    Ok(())
}

fn show_level(files: &FileManager, level: &str) -> Result<()> {
    let data = LevelData::from_file(&level_path(level), files)?;
    match data.player_spawn {
        Some(spawn) => println!("spawn: ({}, {})", spawn.x, spawn.y),
        None => println!("spawn: none"),
    }
    for (i, checkpoint) in data.checkpoints.iter().enumerate() {
        let position = checkpoint.position();
        println!("checkpoint {}: ({}, {})", i, position.x, position.y);
    }
    for marker in data.race_markers.iter() {
        let position = marker.position();
        println!(
            "race {} {:?}: ({}, {})",
            marker.race_id, marker.kind, position.x, position.y
        );
    }
    for display in data.timer_displays.iter() {
        println!("timer display for race {}", display.race_id);
    }
    for end in data.level_ends.iter() {
        println!("level end -> {}", end.send_to);
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let files = FileManager::from_fs(&args.root);
    match args.command()? {
        Command::ListLevels => list_levels(&files),
        Command::BestTimes(level) => print_best_times(&files, &level),
        Command::ShowLevel(level) => show_level(&files, &level),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(_) => {}
        Err(e) => panic!("{}", e),
    }
}
