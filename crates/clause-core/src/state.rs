//! UI state and the regions it drives

use clause_types::AnalysisResult;
use serde::Serialize;

/// The one value the whole page is driven by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Results(AnalysisResult),
}

impl UiState {
    /// The region this state shows
    pub fn region(&self) -> Region {
        match self {
            UiState::Idle => Region::Idle,
            UiState::Loading => Region::Loading,
            UiState::Error(_) => Region::Error,
            UiState::Results(_) => Region::Results,
        }
    }

    pub fn visibility(&self) -> RegionVisibility {
        RegionVisibility::only(self.region())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }
}

/// The four mutually exclusive presentation regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Prompt shown before anything has been submitted
    Idle,
    Loading,
    Error,
    Results,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Idle, Region::Loading, Region::Error, Region::Results];
}

/// Visibility of every region plus the submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionVisibility {
    pub idle: bool,
    pub loading: bool,
    pub error: bool,
    pub results: bool,
    /// The submit control is disabled exactly while loading is shown
    pub submit_enabled: bool,
}

impl RegionVisibility {
    /// Only `region` visible
    pub fn only(region: Region) -> Self {
        let mut visibility = Self {
            idle: false,
            loading: false,
            error: false,
            results: false,
            submit_enabled: true,
        };
        visibility.set(region, true);
        visibility
    }

    pub fn get(&self, region: Region) -> bool {
        match region {
            Region::Idle => self.idle,
            Region::Loading => self.loading,
            Region::Error => self.error,
            Region::Results => self.results,
        }
    }

    pub fn set(&mut self, region: Region, visible: bool) {
        match region {
            Region::Idle => self.idle = visible,
            Region::Loading => {
                self.loading = visible;
                self.submit_enabled = !visible;
            }
            Region::Error => self.error = visible,
            Region::Results => self.results = visible,
        }
    }

    pub fn visible_count(&self) -> usize {
        Region::ALL.iter().filter(|r| self.get(**r)).count()
    }
}

impl Default for RegionVisibility {
    fn default() -> Self {
        Self::only(Region::Idle)
    }
}
