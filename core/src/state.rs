//! Interface state as a single immutable record.
//!
//! Every interaction (drag hover, selection, progress tick, response) is an
//! [`Event`]. [`UiState::apply`] turns the current record plus an event into
//! the next record, so the view never observes a half-updated state.
//!
//! ```text
//! Idle ──select──▶ Validating ──reject──▶ Idle (error shown)
//!                      │
//!                      └──accept──▶ Uploading ──▶ Succeeded | Failed
//! ```
//!
//! Upload events carry the selection cycle they belong to. Events from an
//! older cycle are dropped.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// A locally resolvable URL for image bytes (object URL in the browser).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PreviewRef(String);

impl PreviewRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Image returned by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedImage {
    bytes: Arc<[u8]>,
    content_type: String,
}

impl ProcessedImage {
    pub fn new(bytes: impl Into<Arc<[u8]>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Status of the current upload task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

/// Everything that can happen to the interface.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    DragEntered,
    DragLeft,
    /// Selection failed validation.
    Rejected { message: String },
    /// A valid file was selected and a new cycle starts.
    Selected {
        cycle: u64,
        original: Option<PreviewRef>,
    },
    Progress { cycle: u64, percent: u8 },
    Succeeded { cycle: u64, image: ProcessedImage },
    Failed { cycle: u64, message: String },
}

/// The whole interface state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    /// Current selection cycle, 0 before the first valid selection.
    pub cycle: u64,
    pub phase: Phase,
    /// Upload progress in percent, 0..=100.
    pub progress: u8,
    pub original: Option<PreviewRef>,
    pub result: Option<ProcessedImage>,
    pub error: Option<String>,
    pub drag_active: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next state after `event`. `self` is left untouched.
    pub fn apply(&self, event: Event) -> UiState {
        let mut next = self.clone();
        match event {
            Event::DragEntered => next.drag_active = true,
            Event::DragLeft => next.drag_active = false,
            Event::Rejected { message } => {
                next.drag_active = false;
                next.error = Some(message);
            }
            Event::Selected { cycle, original } => {
                next = UiState {
                    cycle,
                    phase: Phase::Uploading,
                    progress: 0,
                    original,
                    result: None,
                    error: None,
                    drag_active: false,
                };
            }
            Event::Progress { cycle, percent } => {
                if self.is_live(cycle) {
                    next.progress = self.progress.max(percent.min(100));
                }
            }
            Event::Succeeded { cycle, image } => {
                if self.is_live(cycle) {
                    next.phase = Phase::Succeeded;
                    next.result = Some(image);
                    next.error = None;
                }
            }
            Event::Failed { cycle, message } => {
                if self.is_live(cycle) {
                    next.phase = Phase::Failed;
                    next.result = None;
                    next.error = Some(message);
                }
            }
        }
        next
    }

    /// Whether events of `cycle` may still change the state.
    fn is_live(&self, cycle: u64) -> bool {
        cycle == self.cycle && self.phase == Phase::Uploading
    }

    pub fn is_uploading(&self) -> bool {
        self.phase == Phase::Uploading
    }

    pub fn can_download(&self) -> bool {
        self.result.is_some()
    }

    /// What the page should show for this state.
    pub fn render_plan(&self) -> RenderPlan<'_> {
        RenderPlan {
            prompt: if self.drag_active {
                DROP_PROMPT_ACTIVE
            } else {
                DROP_PROMPT_IDLE
            },
            drag_active: self.drag_active,
            error: self.error.as_deref(),
            progress: self.is_uploading().then_some(self.progress),
            original: self.original.as_ref(),
            processed: self.result.as_ref(),
        }
    }
}

/// Dropzone prompt while a file hovers over it.
pub const DROP_PROMPT_ACTIVE: &str = "Drop the image here";

/// Dropzone prompt otherwise.
pub const DROP_PROMPT_IDLE: &str = "Drag 'n' drop an image here, or click to select";

/// Hint under the dropzone prompt.
pub const DROP_HINT: &str = "PNG, JPG, JPEG up to 16MB";

/// Observable view derived from [`UiState`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan<'a> {
    pub prompt: &'static str,
    pub drag_active: bool,
    /// Error text below the dropzone.
    pub error: Option<&'a str>,
    /// Progress indicator, present only while uploading.
    pub progress: Option<u8>,
    /// Original image panel.
    pub original: Option<&'a PreviewRef>,
    /// Processed image panel and download action.
    pub processed: Option<&'a ProcessedImage>,
}

impl RenderPlan<'_> {
    pub fn shows_download(&self) -> bool {
        self.processed.is_some()
    }
}

// =============================================================================
// State stores
// =============================================================================

/// Where the [`UiState`] record lives.
///
/// The frontend backs this with a Leptos signal so the view re-renders on
/// every `apply`.
pub trait StateStore {
    fn snapshot(&self) -> UiState;

    fn apply(&self, event: Event);
}

impl<S: StateStore + ?Sized> StateStore for Rc<S> {
    fn snapshot(&self) -> UiState {
        (**self).snapshot()
    }

    fn apply(&self, event: Event) {
        (**self).apply(event)
    }
}

/// Plain in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RefCell<UiState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn snapshot(&self) -> UiState {
        self.state.borrow().clone()
    }

    fn apply(&self, event: Event) {
        let next = self.state.borrow().apply(event);
        *self.state.borrow_mut() = next;
    }
}
