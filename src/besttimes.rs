use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};
use thiserror::Error;

use crate::constants::SAVED_DIR;
use crate::filemanager::FileManager;

#[derive(Debug, Error, PartialEq)]
pub enum BestTimesError {
    #[error("line {line}: expected \"race_id;time\", got {text:?}")]
    MalformedLine { line: usize, text: String },
    #[error("line {line}: invalid race id {text:?}")]
    InvalidRaceId { line: usize, text: String },
    #[error("line {line}: invalid time {text:?}")]
    InvalidTime { line: usize, text: String },
}

pub fn best_times_path(level: &str) -> PathBuf {
    PathBuf::from(SAVED_DIR).join(format!("{}.txt", level))
}

/*
 * The best time for every race in one level.
 *
 * Stored one record per line as "{race_id};{seconds}". The file is always
 * rewritten in full so it never holds stale duplicates.
 */
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestTimes(BTreeMap<i32, f64>);

impl BestTimes {
    pub fn new() -> Self {
        BestTimes(BTreeMap::new())
    }

    pub fn parse(text: &str) -> Result<BestTimes, BestTimesError> {
        let mut times = BTreeMap::new();
        for (i, line) in text.lines().enumerate() {
            let line_number = i + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((race_id, time)) = line.split_once(';') else {
                return Err(BestTimesError::MalformedLine {
                    line: line_number,
                    text: line.to_owned(),
                });
            };
            let race_id = race_id
                .trim()
                .parse()
                .map_err(|_| BestTimesError::InvalidRaceId {
                    line: line_number,
                    text: race_id.to_owned(),
                })?;
            let time = time
                .trim()
                .parse()
                .map_err(|_| BestTimesError::InvalidTime {
                    line: line_number,
                    text: time.to_owned(),
                })?;
            times.insert(race_id, time);
        }
        Ok(BestTimes(times))
    }

    // A missing file just means nothing has been finished yet.
    pub fn load(files: &FileManager, level: &str) -> Result<BestTimes> {
        let path = best_times_path(level);
        let Some(text) = files.read_optional(&path)? else {
            debug!("no saved times at {:?}", &path);
            return Ok(BestTimes::new());
        };
        let times = BestTimes::parse(&text).context(format!("unable to parse {:?}", &path))?;
        debug!("loaded {} best times from {:?}", times.0.len(), &path);
        Ok(times)
    }

    pub fn save(&self, files: &FileManager, level: &str) -> Result<()> {
        let path = best_times_path(level);
        info!("saving best times to {:?}", &path);
        files.write(&path, &self.to_string())
    }

    pub fn get(&self, race_id: i32) -> Option<f64> {
        self.0.get(&race_id).copied()
    }

    pub fn best_or_infinity(&self, race_id: i32) -> f64 {
        self.get(race_id).unwrap_or(f64::INFINITY)
    }

    pub fn insert(&mut self, race_id: i32, time: f64) {
        self.0.insert(race_id, time);
    }

    // Returns true if time beat the stored best. Ties don't count.
    pub fn record(&mut self, race_id: i32, time: f64) -> bool {
        if time < self.best_or_infinity(race_id) {
            self.0.insert(race_id, time);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl fmt::Display for BestTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (race_id, time) in self.0.iter() {
            writeln!(f, "{};{}", race_id, time)?;
        }
        Ok(())
    }
}

// Formats seconds as "MM:SS:cc" for the timer displays.
pub fn time_string(time: f64) -> String {
    let time = time.max(0.0);
    let minutes = (time / 60.0).floor() as u64;
    let seconds = (time % 60.0).floor() as u64;
    let hundredths = ((time.fract() * 100.0).floor() as u64).min(99);
    format!("{:02}:{:02}:{:02}", minutes, seconds, hundredths)
}
