//! Status presentation
//!
//! [`StatusPresenter`] is the only thing that flips region visibility. Each
//! operation touches one region and is idempotent, so callers can run them in
//! any order. The idle prompt is derived: it is shown exactly when none of the
//! other three regions is.

use tracing::trace;

use crate::render::VisualTree;
use crate::state::{Region, RegionVisibility, UiState};

/// Label shown next to the file picker when nothing is selected
pub const NO_FILE_LABEL: &str = "No file chosen";

/// Mutation surface of a concrete front end (DOM, terminal, test recorder).
///
/// Implementations only apply what they are told. They hold no state machine
/// of their own.
pub trait ViewSurface {
    fn set_region_visible(&mut self, region: Region, visible: bool);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_error_text(&mut self, message: &str);

    /// Inline validation hint next to the form; `None` clears it
    fn set_validation_message(&mut self, message: Option<&str>);

    fn set_file_label(&mut self, label: &str);

    /// Replace whatever results were rendered before with `tree`
    fn replace_results(&mut self, tree: &VisualTree);

    /// Bring the results region into view. Must not block.
    fn scroll_to_results(&mut self) {}
}

/// Visibility controller over a [`ViewSurface`]
///
/// The show/hide pairs do not enforce region exclusivity; `show_error`
/// followed by `show_results` leaves both visible. Callers that need exactly
/// one region hide the others first (as [`UploadController`] does) or use
/// [`StatusPresenter::reconcile`].
///
/// [`UploadController`]: crate::UploadController
pub struct StatusPresenter<V> {
    surface: V,
    visibility: RegionVisibility,
}

impl<V: ViewSurface> StatusPresenter<V> {
    /// Wrap `surface` and push the idle layout to it
    pub fn new(surface: V) -> Self {
        let mut presenter = Self {
            surface,
            visibility: RegionVisibility::default(),
        };
        presenter.reconcile(&UiState::Idle);
        presenter.surface.set_file_label(NO_FILE_LABEL);
        presenter
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    pub fn visibility(&self) -> RegionVisibility {
        self.visibility
    }

    pub fn show_loading(&mut self) {
        self.toggle(Region::Loading, true);
    }

    pub fn hide_loading(&mut self) {
        self.toggle(Region::Loading, false);
    }

    pub fn show_error(&mut self, message: &str) {
        self.surface.set_error_text(message);
        self.toggle(Region::Error, true);
    }

    pub fn hide_error(&mut self) {
        self.toggle(Region::Error, false);
    }

    /// Render `tree` into the results region, reveal it and scroll to it
    pub fn show_results(&mut self, tree: &VisualTree) {
        self.surface.replace_results(tree);
        self.toggle(Region::Results, true);
        self.surface.scroll_to_results();
    }

    pub fn hide_results(&mut self) {
        self.toggle(Region::Results, false);
    }

    pub fn show_validation(&mut self, message: &str) {
        self.surface.set_validation_message(Some(message));
    }

    pub fn hide_validation(&mut self) {
        self.surface.set_validation_message(None);
    }

    pub fn show_file_label(&mut self, filename: Option<&str>) {
        self.surface.set_file_label(filename.unwrap_or(NO_FILE_LABEL));
    }

    /// Force every region to the layout `state` implies
    pub fn reconcile(&mut self, state: &UiState) {
        let target = state.visibility();
        for region in Region::ALL {
            self.surface.set_region_visible(region, target.get(region));
        }
        self.surface.set_submit_enabled(target.submit_enabled);
        self.visibility = target;
    }

    fn toggle(&mut self, region: Region, visible: bool) {
        if self.visibility.get(region) != visible {
            trace!(?region, visible, "region visibility changed");
            self.visibility.set(region, visible);
            self.surface.set_region_visible(region, visible);
            if region == Region::Loading {
                self.surface.set_submit_enabled(!visible);
            }
        }
        self.sync_idle();
    }

    fn sync_idle(&mut self) {
        let idle = !(self.visibility.loading || self.visibility.error || self.visibility.results);
        if self.visibility.idle != idle {
            self.visibility.idle = idle;
            self.surface.set_region_visible(Region::Idle, idle);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Surface that remembers everything it was told
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub visible: std::collections::HashMap<Region, bool>,
        pub submit_enabled: Option<bool>,
        pub error_text: Option<String>,
        pub validation: Option<String>,
        pub file_label: Option<String>,
        pub results: Option<VisualTree>,
        pub replace_count: usize,
        pub scroll_count: usize,
        pub submit_toggles: usize,
    }

    impl RecordingSurface {
        pub fn is_visible(&self, region: Region) -> bool {
            self.visible.get(&region).copied().unwrap_or(false)
        }

        pub fn visible_regions(&self) -> Vec<Region> {
            Region::ALL
                .into_iter()
                .filter(|r| self.is_visible(*r))
                .collect()
        }
    }

    impl ViewSurface for RecordingSurface {
        fn set_region_visible(&mut self, region: Region, visible: bool) {
            self.visible.insert(region, visible);
        }

        fn set_submit_enabled(&mut self, enabled: bool) {
            self.submit_toggles += 1;
            self.submit_enabled = Some(enabled);
        }

        fn set_error_text(&mut self, message: &str) {
            self.error_text = Some(message.to_string());
        }

        fn set_validation_message(&mut self, message: Option<&str>) {
            self.validation = message.map(str::to_string);
        }

        fn set_file_label(&mut self, label: &str) {
            self.file_label = Some(label.to_string());
        }

        fn replace_results(&mut self, tree: &VisualTree) {
            self.replace_count += 1;
            self.results = Some(tree.clone());
        }

        fn scroll_to_results(&mut self) {
            self.scroll_count += 1;
        }
    }
}
