//! SynthBrute theme and color utilities.

use crate::notifications::NotificationLevel;
use agentdesk_core::{DocumentStatus, HttpMethod};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct SynthBruteTheme {
    pub bg: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub secondary_dim: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            bg_secondary: Color::Rgb(26, 26, 26),
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            primary_dim: Color::Rgb(0, 136, 136),
            secondary: Color::Rgb(255, 0, 255),
            secondary_dim: Color::Rgb(136, 0, 136),
            tertiary: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 170, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 170, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            text_muted: Color::Rgb(68, 68, 68),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }

    pub fn border_for(&self, focused: bool) -> Color {
        if focused {
            self.border_focus
        } else {
            self.border
        }
    }
}

/// Badge color per HTTP method.
pub fn method_color(method: HttpMethod, theme: &SynthBruteTheme) -> Color {
    match method {
        HttpMethod::Get => theme.info,
        HttpMethod::Post => theme.success,
        HttpMethod::Put => theme.tertiary,
        HttpMethod::Delete => theme.error,
        HttpMethod::Patch => theme.secondary,
    }
}

pub fn document_status_color(status: DocumentStatus, theme: &SynthBruteTheme) -> Color {
    match status {
        DocumentStatus::Uploading => theme.info,
        DocumentStatus::Processing => theme.warning,
        DocumentStatus::Ready => theme.success,
        DocumentStatus::Error => theme.error,
    }
}

pub fn agent_status_color(status: &str, theme: &SynthBruteTheme) -> Color {
    match status.trim().to_ascii_lowercase().as_str() {
        "active" => theme.success,
        "inactive" => theme.text_dim,
        "draft" => theme.warning,
        _ => theme.text_dim,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &SynthBruteTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}
