//! Port output commands (motor power, RGB light).
//!
//! These drive the application-facing control surface: rapid, idempotent
//! "set power" style writes gated only on session readiness.

use super::Command;
use hublink_core::PortId;
use serde::{Deserialize, Serialize};

/// Message type of port output commands.
const MESSAGE_TYPE: u8 = 0x81;

/// Startup-and-completion flags: execute immediately, no feedback.
const STARTUP_IMMEDIATE_NO_ACTION: u8 = 0x11;

/// Write-direct-mode-data sub-command.
const SUB_WRITE_DIRECT_MODE_DATA: u8 = 0x51;

/// Preset colors of the built-in RGB light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Pink = 1,
    Purple = 2,
    Blue = 3,
    LightBlue = 4,
    Cyan = 5,
    Green = 6,
    Yellow = 7,
    Orange = 8,
    Red = 9,
    White = 10,
}

impl Color {
    /// Decode a color index; `None` outside the preset range.
    #[must_use]
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Black),
            1 => Some(Self::Pink),
            2 => Some(Self::Purple),
            3 => Some(Self::Blue),
            4 => Some(Self::LightBlue),
            5 => Some(Self::Cyan),
            6 => Some(Self::Green),
            7 => Some(Self::Yellow),
            8 => Some(Self::Orange),
            9 => Some(Self::Red),
            10 => Some(Self::White),
            _ => None,
        }
    }
}

/// Start a motor at a signed power level.
///
/// Power is clamped to -100..=100; zero stops the motor (float).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorStartPowerCommand {
    pub port: PortId,
    pub power: i8,
}

impl MotorStartPowerCommand {
    #[must_use]
    pub fn new(port: PortId, power: i8) -> Self {
        Self {
            port,
            power: power.clamp(-100, 100),
        }
    }
}

impl Command for MotorStartPowerCommand {
    fn message_type(&self) -> u8 {
        MESSAGE_TYPE
    }

    fn payload(&self) -> Vec<u8> {
        vec![
            self.port.as_u8(),
            STARTUP_IMMEDIATE_NO_ACTION,
            SUB_WRITE_DIRECT_MODE_DATA,
            0x00,
            self.power as u8,
        ]
    }
}

/// Set the built-in RGB light to a preset color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbLightColorCommand {
    pub port: PortId,
    pub color: Color,
}

impl RgbLightColorCommand {
    #[must_use]
    pub fn new(port: PortId, color: Color) -> Self {
        Self { port, color }
    }
}

impl Command for RgbLightColorCommand {
    fn message_type(&self) -> u8 {
        MESSAGE_TYPE
    }

    fn payload(&self) -> Vec<u8> {
        vec![
            self.port.as_u8(),
            STARTUP_IMMEDIATE_NO_ACTION,
            SUB_WRITE_DIRECT_MODE_DATA,
            0x00,
            self.color as u8,
        ]
    }
}
