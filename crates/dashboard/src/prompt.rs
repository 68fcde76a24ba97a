//! Confirmation and notification seam.
//!
//! Every destructive or state-changing mutation goes through an
//! [`OperatorPrompt`]: a yes/no confirmation before the remote write, and a
//! success/error notice after it. The mutation proceeds only on an
//! affirmative result; a declined prompt is a normal no-op, not an error.

use clementine_core::OrderStatus;

/// Visual tone of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTone {
    /// A routine question (e.g., status change).
    Question,
    /// An irreversible action (e.g., delete).
    Warning,
}

/// Visual tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Error,
}

/// A yes/no prompt shown before a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub body: String,
    pub tone: PromptTone,
}

/// A toast shown after a mutation completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub tone: NoticeTone,
}

/// The surface mutations are confirmed through and report back to.
pub trait OperatorPrompt {
    /// Present a yes/no prompt; the caller blocks on the answer.
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;

    /// Present a success/error notice.
    fn notify(&self, notice: &Notice);
}

pub(crate) fn status_change_prompt(status: &OrderStatus) -> ConfirmPrompt {
    ConfirmPrompt {
        title: "Confirm Status Change?".to_string(),
        body: format!("Change order status to {status}?"),
        tone: PromptTone::Question,
    }
}

pub(crate) fn delete_order_prompt() -> ConfirmPrompt {
    ConfirmPrompt {
        title: "Are you sure?".to_string(),
        body: "You won't be able to revert this!".to_string(),
        tone: PromptTone::Warning,
    }
}

pub(crate) fn delete_product_prompt() -> ConfirmPrompt {
    ConfirmPrompt {
        title: "Delete Product?".to_string(),
        body: "This action cannot be undone!".to_string(),
        tone: PromptTone::Warning,
    }
}

pub(crate) fn success_notice(title: &str, body: &str) -> Notice {
    Notice {
        title: title.to_string(),
        body: body.to_string(),
        tone: NoticeTone::Success,
    }
}

pub(crate) fn error_notice(body: &str) -> Notice {
    Notice {
        title: "Error!".to_string(),
        body: body.to_string(),
        tone: NoticeTone::Error,
    }
}
