//! Preview modal state.
//!
//! Each preview invocation takes a generation token from [`PreviewModal::open`].
//! Results come back tagged with that token and are applied according to the
//! active [`PreviewOrdering`].

/// Text shown while a preview request is outstanding.
pub const PREVIEW_LOADING_TEXT: &str = "Generating preview...";

/// Text shown when the service answered without a preview.
pub const NO_PREVIEW_TEXT: &str = "No preview available.";

/// Text shown when the preview request failed.
pub const PREVIEW_FAILED_TEXT: &str = "Failed to generate preview.";

/// How overlapping preview responses are applied to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewOrdering {
    /// Apply every response as it arrives. A slow earlier request can
    /// overwrite the result of a later one.
    #[default]
    Arrival,
    /// Apply only the response to the most recent request.
    Latest,
}

impl PreviewOrdering {
    /// Toggles between the two policies.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Arrival => Self::Latest,
            Self::Latest => Self::Arrival,
        }
    }

    /// Returns the display name for this policy.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Arrival => "Arrival",
            Self::Latest => "Latest",
        }
    }

    /// Parses a persisted name, falling back to the default.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Latest" => Self::Latest,
            _ => Self::Arrival,
        }
    }
}

/// Body of the preview modal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewBody {
    /// Waiting for the service.
    #[default]
    Loading,
    /// Preview text returned by the service.
    Text(String),
    /// The service answered without a preview.
    Empty,
    /// The request failed.
    Failed,
}

impl PreviewBody {
    /// Text the modal displays for this body.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Loading => PREVIEW_LOADING_TEXT,
            Self::Text(text) => text,
            Self::Empty => NO_PREVIEW_TEXT,
            Self::Failed => PREVIEW_FAILED_TEXT,
        }
    }

    /// Returns true while waiting for the service.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// State of the preview modal.
#[derive(Debug, Clone, Default)]
pub struct PreviewModal {
    visible: bool,
    title: String,
    body: PreviewBody,
    generation: u64,
}

impl PreviewModal {
    /// Opens the modal for a direction and returns the request's token.
    ///
    /// The modal shows `title` and the loading text until a result arrives.
    pub fn open(&mut self, title: impl Into<String>) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.visible = true;
        self.title = title.into();
        self.body = PreviewBody::Loading;
        self.generation
    }

    /// Applies a result tagged with `generation`.
    ///
    /// Returns false if the result was discarded as stale under
    /// [`PreviewOrdering::Latest`].
    pub fn settle(&mut self, generation: u64, body: PreviewBody, ordering: PreviewOrdering) -> bool {
        if ordering == PreviewOrdering::Latest && generation != self.generation {
            return false;
        }
        self.body = body;
        true
    }

    /// Hides the modal. Calling it on a hidden modal does nothing.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Returns true while the modal is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Name of the direction being previewed.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current body of the modal.
    #[must_use]
    pub const fn body(&self) -> &PreviewBody {
        &self.body
    }

    /// Token of the most recent invocation.
    #[must_use]
    pub const fn latest_generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_shows_title_and_loading() {
        let mut modal = PreviewModal::default();
        assert!(!modal.is_visible());

        let token = modal.open("Flee");
        assert_eq!(token, 1);
        assert!(modal.is_visible());
        assert_eq!(modal.title(), "Flee");
        assert!(modal.body().is_loading());
        assert_eq!(modal.body().text(), PREVIEW_LOADING_TEXT);
    }

    #[test]
    fn tokens_increase_per_invocation() {
        let mut modal = PreviewModal::default();
        let first = modal.open("A");
        let second = modal.open("B");
        assert!(second > first);
        assert_eq!(modal.latest_generation(), second);
        assert_eq!(modal.title(), "B");
    }

    #[test]
    fn arrival_ordering_lets_stale_result_win() {
        let mut modal = PreviewModal::default();
        let a = modal.open("A");
        let b = modal.open("B");

        assert!(modal.settle(b, PreviewBody::Text("B text".into()), PreviewOrdering::Arrival));
        assert!(modal.settle(a, PreviewBody::Text("A text".into()), PreviewOrdering::Arrival));
        assert_eq!(modal.body().text(), "A text");
    }

    #[test]
    fn latest_ordering_discards_stale_result() {
        let mut modal = PreviewModal::default();
        let a = modal.open("A");
        let b = modal.open("B");

        assert!(modal.settle(b, PreviewBody::Text("B text".into()), PreviewOrdering::Latest));
        assert!(!modal.settle(a, PreviewBody::Text("A text".into()), PreviewOrdering::Latest));
        assert_eq!(modal.body().text(), "B text");
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut modal = PreviewModal::default();
        modal.open("A");
        modal.dismiss();
        assert!(!modal.is_visible());
        modal.dismiss();
        assert!(!modal.is_visible());
    }

    #[test]
    fn fallback_texts() {
        assert_eq!(PreviewBody::Empty.text(), "No preview available.");
        assert_eq!(PreviewBody::Failed.text(), "Failed to generate preview.");
    }

    #[test]
    fn ordering_names_round_trip() {
        for ordering in [PreviewOrdering::Arrival, PreviewOrdering::Latest] {
            assert_eq!(PreviewOrdering::from_name(ordering.name()), ordering);
        }
        assert_eq!(PreviewOrdering::from_name("bogus"), PreviewOrdering::Arrival);
        assert_eq!(PreviewOrdering::Arrival.next(), PreviewOrdering::Latest);
        assert_eq!(PreviewOrdering::Latest.next(), PreviewOrdering::Arrival);
    }
}
