//! Per-stage copy shown next to the flow diagram.
//!
//! Presentation strings live here, outside the state machine, keyed by
//! [`Stage`].

use ab_protocol::Stage;
use ratatui::style::Color;

/// Everything the UI says about one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCopy {
    /// Short name used in the timeline.
    pub title: &'static str,
    /// One-line status message.
    pub message: &'static str,
    pub icon: &'static str,
    /// Which actor is busy during the stage.
    pub actor: &'static str,
    /// Longer explanation for the detail panel.
    pub details: &'static [&'static str],
    pub color: Color,
}

pub fn stage_copy(stage: Stage) -> StageCopy {
    match stage {
        Stage::Idle => StageCopy {
            title: "Idle",
            message: "Waiting for a request...",
            icon: "⏸",
            actor: "frontend",
            details: &[
                "The frontend waits for the user to type a city.",
                "No API call has been made yet.",
            ],
            color: Color::DarkGray,
        },
        Stage::Sending => StageCopy {
            title: "Send",
            message: "Sending the request to the backend...",
            icon: "📤",
            actor: "frontend",
            details: &[
                "The frontend posts the city to its own backend.",
                "The frontend never holds the API key.",
            ],
            color: Color::Blue,
        },
        Stage::BackendProcessing => StageCopy {
            title: "Backend",
            message: "Backend: reading the API key from the environment...",
            icon: "⚙",
            actor: "backend",
            details: &[
                "The backend reads its credential from an environment variable.",
                "It validates the request before going further.",
            ],
            color: Color::Magenta,
        },
        Stage::CallingExternal => StageCopy {
            title: "Call API",
            message: "Calling the external API...",
            icon: "🌐",
            actor: "backend",
            details: &[
                "The backend acts as a proxy towards the third-party service.",
                "The key travels only between backend and service.",
            ],
            color: Color::Yellow,
        },
        Stage::ExternalResponding => StageCopy {
            title: "Response",
            message: "Receiving raw data from the API...",
            icon: "📥",
            actor: "external",
            details: &[
                "The service answers with its own nested format.",
                "Units are Kelvin and metres per second.",
            ],
            color: Color::LightYellow,
        },
        Stage::Normalizing => StageCopy {
            title: "Normalize",
            message: "Normalizing the data...",
            icon: "✨",
            actor: "backend",
            details: &[
                "The backend flattens the payload for the UI.",
                "Kelvin becomes Celsius, m/s becomes km/h.",
            ],
            color: Color::Cyan,
        },
        Stage::Complete => StageCopy {
            title: "Done",
            message: "Data ready for display!",
            icon: "✅",
            actor: "frontend",
            details: &["The frontend renders the flat record."],
            color: Color::Green,
        },
        Stage::Error => StageCopy {
            title: "Error",
            message: "The API call failed",
            icon: "❌",
            actor: "backend",
            details: &["The city is unknown to the service; the backend reports it."],
            color: Color::Red,
        },
    }
}
