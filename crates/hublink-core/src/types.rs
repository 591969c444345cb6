use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a physical hub for the lifetime of one connection.
///
/// The radio layer assigns one per discovered peripheral (a CoreBluetooth
/// peripheral UUID on macOS, a synthetic UUID elsewhere). It keys every
/// per-hub collection in the session manager and is never reused across
/// distinct physical connections, even to the same hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HubId(Uuid);

impl HubId {
    /// Generate a fresh identity.
    ///
    /// Used by radio backends and test doubles when a peripheral is first
    /// observed.
    #[must_use]
    pub fn new() -> Self {
        HubId(Uuid::new_v4())
    }

    /// Wrap an identity assigned by the platform radio stack.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        HubId(uuid)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for HubId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HubId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Addressable slot on a hub to which a peripheral may be attached.
///
/// Raw port identifiers are hub-family specific; the session manager treats
/// them as opaque map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortId(u8);

impl PortId {
    #[must_use]
    pub fn new(id: u8) -> Self {
        PortId(id)
    }

    /// Get the raw port identifier as u8.
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

impl From<u8> for PortId {
    fn from(id: u8) -> Self {
        PortId(id)
    }
}

/// Supported hub families.
///
/// Determined exactly once, at discovery time, from the system-type byte of
/// the advertised manufacturer data. Immutable for the lifetime of the
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HubKind {
    /// Boost Move Hub (current firmware).
    MoveHub,
    /// Boost Move Hub with pre-release firmware.
    MoveHubV1,
    /// Powered Up Smart Hub (two-port city hub).
    SmartHub,
    /// Powered Up remote control handset.
    RemoteControl,
    /// Duplo train base.
    TrainBase,
    /// Control+ / Technic four-port hub.
    ControlPlusHub,
}

impl HubKind {
    /// Resolve a hub family from the advertised system-type byte.
    ///
    /// Returns `None` for system types this core does not support; the
    /// advertisement is then ignored during discovery.
    #[must_use]
    pub fn from_system_type(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::MoveHubV1),
            0x20 => Some(Self::TrainBase),
            0x40 => Some(Self::MoveHub),
            0x41 => Some(Self::SmartHub),
            0x42 => Some(Self::RemoteControl),
            0x80 => Some(Self::ControlPlusHub),
            _ => None,
        }
    }

    /// The system-type byte this family advertises.
    #[must_use]
    pub fn system_type(&self) -> u8 {
        match self {
            Self::MoveHubV1 => 0x00,
            Self::TrainBase => 0x20,
            Self::MoveHub => 0x40,
            Self::SmartHub => 0x41,
            Self::RemoteControl => 0x42,
            Self::ControlPlusHub => 0x80,
        }
    }
}

impl fmt::Display for HubKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::MoveHub => "Move Hub",
            Self::MoveHubV1 => "Move Hub (v1 firmware)",
            Self::SmartHub => "Smart Hub",
            Self::RemoteControl => "Remote Control",
            Self::TrainBase => "Duplo Train Base",
            Self::ControlPlusHub => "Control+ Hub",
        };
        write!(f, "{name}")
    }
}

/// Category of peripheral detected as mounted on a port.
///
/// Decoded from the 16-bit IO type identifier in attached-I/O notifications.
/// Identifiers newer than this enumeration map to [`IoType::Unknown`] so an
/// unrecognized peripheral never blocks dispatch for the rest of the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IoType {
    Motor,
    TrainMotor,
    Light,
    VoltageSensor,
    CurrentSensor,
    PiezoSpeaker,
    RgbLight,
    TiltSensor,
    MotionSensor,
    ColorDistanceSensor,
    InteractiveMotor,
    BuiltInMotor,
    BuiltInTiltSensor,
    DuploTrainMotor,
    DuploTrainSpeaker,
    DuploTrainColorSensor,
    DuploTrainSpeedometer,
    TechnicLargeMotor,
    TechnicXLargeMotor,
    RemoteButton,
    RemoteRssi,
    /// IO type identifier not known to this crate version.
    Unknown(u16),
}

impl IoType {
    /// Decode a 16-bit IO type identifier from an attached-I/O notification.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0x0001 => Self::Motor,
            0x0002 => Self::TrainMotor,
            0x0008 => Self::Light,
            0x0014 => Self::VoltageSensor,
            0x0015 => Self::CurrentSensor,
            0x0016 => Self::PiezoSpeaker,
            0x0017 => Self::RgbLight,
            0x0022 => Self::TiltSensor,
            0x0023 => Self::MotionSensor,
            0x0025 => Self::ColorDistanceSensor,
            0x0026 => Self::InteractiveMotor,
            0x0027 => Self::BuiltInMotor,
            0x0028 => Self::BuiltInTiltSensor,
            0x0029 => Self::DuploTrainMotor,
            0x002A => Self::DuploTrainSpeaker,
            0x002B => Self::DuploTrainColorSensor,
            0x002C => Self::DuploTrainSpeedometer,
            0x002E => Self::TechnicLargeMotor,
            0x002F => Self::TechnicXLargeMotor,
            0x0037 => Self::RemoteButton,
            0x0038 => Self::RemoteRssi,
            other => Self::Unknown(other),
        }
    }

    /// The raw 16-bit identifier of this IO type.
    #[must_use]
    pub fn as_raw(&self) -> u16 {
        match self {
            Self::Motor => 0x0001,
            Self::TrainMotor => 0x0002,
            Self::Light => 0x0008,
            Self::VoltageSensor => 0x0014,
            Self::CurrentSensor => 0x0015,
            Self::PiezoSpeaker => 0x0016,
            Self::RgbLight => 0x0017,
            Self::TiltSensor => 0x0022,
            Self::MotionSensor => 0x0023,
            Self::ColorDistanceSensor => 0x0025,
            Self::InteractiveMotor => 0x0026,
            Self::BuiltInMotor => 0x0027,
            Self::BuiltInTiltSensor => 0x0028,
            Self::DuploTrainMotor => 0x0029,
            Self::DuploTrainSpeaker => 0x002A,
            Self::DuploTrainColorSensor => 0x002B,
            Self::DuploTrainSpeedometer => 0x002C,
            Self::TechnicLargeMotor => 0x002E,
            Self::TechnicXLargeMotor => 0x002F,
            Self::RemoteButton => 0x0037,
            Self::RemoteRssi => 0x0038,
            Self::Unknown(raw) => *raw,
        }
    }

    /// Default sensor mode used when subscribing to value updates for this
    /// peripheral.
    ///
    /// Most peripherals report on mode 0; the color & distance sensor uses
    /// its combined color/distance mode.
    #[must_use]
    pub fn default_sensor_mode(&self) -> u8 {
        match self {
            Self::ColorDistanceSensor => 0x08,
            _ => 0x00,
        }
    }

    /// Whether this peripheral can drive motor power commands.
    #[must_use]
    pub fn is_motor(&self) -> bool {
        matches!(
            self,
            Self::Motor
                | Self::TrainMotor
                | Self::InteractiveMotor
                | Self::BuiltInMotor
                | Self::DuploTrainMotor
                | Self::TechnicLargeMotor
                | Self::TechnicXLargeMotor
        )
    }
}

/// Hub-level properties reported and subscribed over the control link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HubProperty {
    AdvertisingName,
    Button,
    FirmwareVersion,
    HardwareVersion,
    Rssi,
    BatteryVoltage,
    /// Property identifier not known to this crate version.
    Unknown(u8),
}

impl HubProperty {
    /// Decode a property identifier byte.
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0x01 => Self::AdvertisingName,
            0x02 => Self::Button,
            0x03 => Self::FirmwareVersion,
            0x04 => Self::HardwareVersion,
            0x05 => Self::Rssi,
            0x06 => Self::BatteryVoltage,
            other => Self::Unknown(other),
        }
    }

    /// The wire identifier of this property.
    #[must_use]
    pub fn as_raw(&self) -> u8 {
        match self {
            Self::AdvertisingName => 0x01,
            Self::Button => 0x02,
            Self::FirmwareVersion => 0x03,
            Self::HardwareVersion => 0x04,
            Self::Rssi => 0x05,
            Self::BatteryVoltage => 0x06,
            Self::Unknown(raw) => *raw,
        }
    }
}

impl fmt::Display for HubProperty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AdvertisingName => write!(f, "advertising name"),
            Self::Button => write!(f, "button"),
            Self::FirmwareVersion => write!(f, "firmware version"),
            Self::HardwareVersion => write!(f, "hardware version"),
            Self::Rssi => write!(f, "RSSI"),
            Self::BatteryVoltage => write!(f, "battery voltage"),
            Self::Unknown(raw) => write!(f, "property 0x{raw:02X}"),
        }
    }
}
