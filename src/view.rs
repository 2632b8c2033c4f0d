//! Display surface driven by the widget

use std::sync::{Arc, Mutex, MutexGuard};
use log::trace;

pub const SUBMIT_LABEL: &str = "Analyze";
pub const SUBMIT_LABEL_BUSY: &str = "Analyzing...";

/// Where the widget renders.
/// Only ever called from the widget task.
pub trait View: Send + 'static
{   /// Toggle the loading indicator and the submit control
    fn set_loading(&mut self, loading: bool);
    fn hide_results(&mut self);
    /// Show a formatted answer
    fn show_results(&mut self, answer: &crate::format::FormattedAnswer);
    /// Show the inline error panel
    fn show_error(&mut self, message: &str);
    fn scroll_to_results(&mut self);
    fn set_status(&mut self, status: &crate::ConnectionStatus);
}

/// What the results area holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel
{   /// Formatted answer markup
    Answer(String)
  , /// Unformatted answer, shown as text
    Text(String)
  , /// Raw error message
    Error(String)
}

impl Panel
{   pub fn to_markup(&self) -> String
    {   match self
        {   Panel::Answer(markup) => markup.clone()
          , Panel::Text(text) => crate::format::escape_html(text)
          , Panel::Error(message) => {
              crate::format::render_error(message)
            }
        }
    }
}

/// Snapshot of everything a `MemoryView` displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState
{   pub loading: bool
  , pub submit_enabled: bool
  , pub submit_label: &'static str
  , pub results_visible: bool
  , pub panel: Option<Panel>
  , pub status: crate::ConnectionStatus
  , pub scroll_count: usize
}

impl Default for ViewState
{   fn default() -> Self
    {   ViewState
        {   loading: false
          , submit_enabled: true
          , submit_label: SUBMIT_LABEL
          , results_visible: false
          , panel: None
          , status: crate::ConnectionStatus::Connecting
          , scroll_count: 0
        }
    }
}

/// In-memory view; clones share state so callers can
/// keep one handle and give the other to the widget.
#[derive(Debug, Clone, Default)]
pub struct MemoryView
{   state: Arc<Mutex<ViewState>>
}

impl MemoryView
{   pub fn new() -> Self
    {   MemoryView::default()
    }

    pub fn snapshot(&self) -> ViewState
    {   self.lock().clone()
    }

    /// Markup of the results area, if visible
    pub fn results_markup(&self) -> Option<String>
    {   let state = self.lock();
        if !state.results_visible
        {   return None;
        }
        state.panel.as_ref().map(Panel::to_markup)
    }

    fn lock(&self) -> MutexGuard<'_, ViewState>
    {   self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl View for MemoryView
{   fn set_loading(&mut self, loading: bool)
    {   trace!("view loading: {}", loading);
        let mut state = self.lock();
        state.loading = loading;
        state.submit_enabled = !loading;
        state.submit_label = if loading
        {   SUBMIT_LABEL_BUSY
        } else
        {   SUBMIT_LABEL
        };
    }

    fn hide_results(&mut self)
    {   self.lock().results_visible = false;
    }

    fn show_results(&mut self, answer: &crate::format::FormattedAnswer)
    {   let panel = match answer
        {   crate::format::FormattedAnswer::Blocks(_) => {
              Panel::Answer(answer.to_markup())
            }
          , crate::format::FormattedAnswer::Plain(text) => {
              Panel::Text(text.clone())
            }
        };
        let mut state = self.lock();
        state.panel = Some(panel);
        state.results_visible = true;
    }

    fn show_error(&mut self, message: &str)
    {   let mut state = self.lock();
        state.panel = Some(Panel::Error(message.to_string()));
        state.results_visible = true;
    }

    fn scroll_to_results(&mut self)
    {   self.lock().scroll_count += 1;
    }

    fn set_status(&mut self, status: &crate::ConnectionStatus)
    {   trace!("view status: {}", status.label());
        self.lock().status = status.clone();
    }
}
