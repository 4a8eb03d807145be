use anyhow::{Context, Result};
use log::debug;

use crate::constants::{FIRST_LEVEL, LEVELS_DIR, MAIN_MENU_LEVEL};
use crate::filemanager::FileManager;

/*
 * The playable levels, in the order the menu lists them.
 *
 * Every .tmx file in the levels directory except the main menu counts. Names
 * are sorted, with the tutorial pulled to the front.
 */
pub struct LevelIndex {
    levels: Vec<String>,
}

impl LevelIndex {
    pub fn from_files(files: &FileManager) -> Result<Self> {
        let pattern = format!("{}/*.tmx", LEVELS_DIR);
        let mut levels = Vec::new();
        for path in files.glob(&pattern)? {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .context(format!("unable to encode name {:?}", path))?
                .to_owned();
            if name == MAIN_MENU_LEVEL {
                continue;
            }
            debug!("found level {:?} at {:?}", &name, &path);
            levels.push(name);
        }
        Ok(Self::from_names(levels))
    }

    pub fn from_names(mut levels: Vec<String>) -> Self {
        levels.sort();
        levels.dedup();
        if let Some(i) = levels.iter().position(|name| name == FIRST_LEVEL) {
            let first = levels.remove(i);
            levels.insert(0, first);
        }
        Self { levels }
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn contains(&self, name: &str) -> bool {
        self.levels.iter().any(|level| level == name)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
