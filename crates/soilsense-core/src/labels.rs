//! Activity and area categories resolved from file and directory names

use crate::error::{SoilError, SoilResult};
use serde::{Deserialize, Serialize};

/// Activity performed during a trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    Dig,
    Jump,
    Walk,
}

/// Field site (soil type) where a trial was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    Syf,
    Yqcc,
    Zwy,
    J11,
    Zyq,
}

/// File-name tokens, checked in order
const ACTIVITY_TOKENS: [(&str, Activity); 3] = [
    ("dig", Activity::Dig),
    ("jump", Activity::Jump),
    ("walk", Activity::Walk),
];

/// Directory-name tokens, checked in order
const AREA_TOKENS: [(&str, Area); 5] = [
    ("syf", Area::Syf),
    ("yqcc", Area::Yqcc),
    ("zwy", Area::Zwy),
    ("j11", Area::J11),
    ("zyq", Area::Zyq),
];

fn lookup<T: Copy>(table: &[(&'static str, T)], name: &str) -> Option<T> {
    table.iter()
        .find(|(token, _)| name.contains(token))
        .map(|&(_, category)| category)
}

impl Activity {
    /// Resolve the activity encoded in a signal file name
    pub fn from_file_name(file_name: &str) -> SoilResult<Self> {
        lookup(&ACTIVITY_TOKENS, file_name).ok_or_else(|| SoilError::UnknownActivity {
            name: file_name.to_string(),
        })
    }

    /// Token matched in file names
    pub fn token(self) -> &'static str {
        match self {
            Activity::Dig => "dig",
            Activity::Jump => "jump",
            Activity::Walk => "walk",
        }
    }

    /// Class index used as the training label
    pub fn label(self) -> usize {
        match self {
            Activity::Dig => 0,
            Activity::Jump => 1,
            Activity::Walk => 2,
        }
    }

    pub fn all() -> [Activity; 3] {
        ACTIVITY_TOKENS.map(|(_, activity)| activity)
    }
}

impl Area {
    /// Resolve the area encoded in a root directory name
    pub fn from_dir_name(dir_name: &str) -> SoilResult<Self> {
        lookup(&AREA_TOKENS, dir_name).ok_or_else(|| SoilError::UnknownArea {
            name: dir_name.to_string(),
        })
    }

    pub fn token(self) -> &'static str {
        match self {
            Area::Syf => "syf",
            Area::Yqcc => "yqcc",
            Area::Zwy => "zwy",
            Area::J11 => "j11",
            Area::Zyq => "zyq",
        }
    }

    pub fn label(self) -> usize {
        match self {
            Area::Syf => 0,
            Area::Yqcc => 1,
            Area::Zwy => 2,
            Area::J11 => 3,
            Area::Zyq => 4,
        }
    }

    pub fn all() -> [Area; 5] {
        AREA_TOKENS.map(|(_, area)| area)
    }
}

/// Activity class index for a signal file name
pub fn get_activity_label(file_name: &str) -> SoilResult<usize> {
    Activity::from_file_name(file_name).map(Activity::label)
}

/// Area class index for a root directory name
pub fn get_area_label(dir_name: &str) -> SoilResult<usize> {
    Area::from_dir_name(dir_name).map(Area::label)
}

impl std::str::FromStr for Activity {
    type Err = SoilError;

    /// Parse an exact token such as `dig`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::all()
            .into_iter()
            .find(|activity| activity.token() == s)
            .ok_or_else(|| SoilError::UnknownActivity { name: s.to_string() })
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}
