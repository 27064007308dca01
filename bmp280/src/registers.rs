//!
//! BMP280 register map and bit-field codec
//!
//! Fields are kept at their datasheet bit positions rather than shifted down, so a
//! decoded value can be written straight back.
//!

pub const CHIP_ID : u8 = 0x58;

pub const DIG_T1_REG : u8 = 0x88;
pub const DIG_T2_REG : u8 = 0x8A;
pub const DIG_T3_REG : u8 = 0x8C;
pub const DIG_P1_REG : u8 = 0x8E;
pub const DIG_P2_REG : u8 = 0x90;
pub const DIG_P3_REG : u8 = 0x92;
pub const DIG_P4_REG : u8 = 0x94;
pub const DIG_P5_REG : u8 = 0x96;
pub const DIG_P6_REG : u8 = 0x98;
pub const DIG_P7_REG : u8 = 0x9A;
pub const DIG_P8_REG : u8 = 0x9C;
pub const DIG_P9_REG : u8 = 0x9E;

pub const ID_REG : u8 = 0xD0;
pub const STATUS_REG : u8 = 0xF3;
pub const CTRL_MEAS_REG : u8 = 0xF4;
pub const CONFIG_REG : u8 = 0xF5;

pub const PRESS_MSB : u8 = 0xF7;
pub const PRESS_LSB : u8 = 0xF8;
pub const PRESS_XLSB : u8 = 0xF9;
pub const TEMP_MSB : u8 = 0xFA;
pub const TEMP_LSB : u8 = 0xFB;
pub const TEMP_XLSB : u8 = 0xFC;

pub const MEASURING : u8 = 0x08;
pub const IM_UPDATE : u8 = 0x01;

const STANDBY_MASK : u8 = 0xE0;
const FILTER_MASK : u8 = 0x1C;
// bit 0 of config must be written as zero
const CONFIG_RESERVED : u8 = 0x01;
const OSRS_T_MASK : u8 = 0xE0;
const OSRS_P_MASK : u8 = 0x1C;
const MODE_MASK : u8 = 0x03;


//----------------------------------------------------------------------------------------------------------------------------------
/// Inactive duration between measurements in normal mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Standby {
    Ms0_5,
    Ms62_5,
    Ms125,
    Ms250,
    Ms500,
    Ms1000,
    Ms2000,
    Ms4000,
}

impl Standby {
    pub fn value(&self) -> u8 {
        match *self {
            Standby::Ms0_5 => 0x00,
            Standby::Ms62_5 => 0x20,
            Standby::Ms125 => 0x40,
            Standby::Ms250 => 0x60,
            Standby::Ms500 => 0x80,
            Standby::Ms1000 => 0xA0,
            Standby::Ms2000 => 0xC0,
            Standby::Ms4000 => 0xE0,
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
/// IIR filter coefficient
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Off,
    X2,
    X4,
    X8,
    X16,
}

impl Filter {
    pub fn value(&self) -> u8 {
        match *self {
            Filter::Off => 0x00,  // 1 sample
            Filter::X2 => 0x04,   // 2 samples
            Filter::X4 => 0x08,   // 5 samples
            Filter::X8 => 0x0C,   // 11 samples
            Filter::X16 => 0x10,  // 22 samples
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TempOversampling {
    Skip,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl TempOversampling {
    pub fn value(&self) -> u8 {
        match *self {
            TempOversampling::Skip => 0x00,
            TempOversampling::X1 => 0x20,
            TempOversampling::X2 => 0x40,
            TempOversampling::X4 => 0x60,
            TempOversampling::X8 => 0x80,
            TempOversampling::X16 => 0xA0,
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressureOversampling {
    Skip,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl PressureOversampling {
    pub fn value(&self) -> u8 {
        match *self {
            PressureOversampling::Skip => 0x00,
            PressureOversampling::X1 => 0x04,
            PressureOversampling::X2 => 0x08,
            PressureOversampling::X4 => 0x0C,
            PressureOversampling::X8 => 0x10,
            PressureOversampling::X16 => 0x14,
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Sleep,
    Forced,
    Normal,
}

impl Mode {
    pub fn value(&self) -> u8 {
        match *self {
            Mode::Sleep => 0x00,
            Mode::Forced => 0x01,
            Mode::Normal => 0x03,
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
/// `config` (0xF5)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigFields {
    pub standby : u8,
    pub filter_coefficient : u8,
}

impl ConfigFields {
    pub fn new(standby : u8, filter_coefficient : u8) -> Self {
        Self { standby, filter_coefficient }
    }

    pub fn decode(value : u8) -> Self {
        Self {
            standby : value & STANDBY_MASK,
            filter_coefficient : value & FILTER_MASK,
        }
    }

    pub fn encode(&self) -> u8 {
        (self.standby | self.filter_coefficient) & !CONFIG_RESERVED
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
/// `ctrl_meas` (0xF4)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CtrlMeasFields {
    pub osrs_p : u8,
    pub osrs_t : u8,
    pub mode : u8,
}

impl CtrlMeasFields {
    pub fn new(osrs_p : u8, osrs_t : u8, mode : u8) -> Self {
        Self { osrs_p, osrs_t, mode }
    }

    pub fn decode(value : u8) -> Self {
        Self {
            osrs_p : value & OSRS_P_MASK,
            osrs_t : value & OSRS_T_MASK,
            mode : value & MODE_MASK,
        }
    }

    pub fn encode(&self) -> u8 {
        self.osrs_p | self.osrs_t | self.mode
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
/// `status` (0xF3), read only
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusFields {
    pub measuring : u8,
    pub im_update : u8,
}

impl StatusFields {
    pub fn decode(value : u8) -> Self {
        Self {
            measuring : value & MEASURING,
            im_update : value & IM_UPDATE,
        }
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
/// `id` (0xD0), read only
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChipId {
    pub chip : u8,
}

impl ChipId {
    pub fn decode(value : u8) -> Self {
        Self { chip : value }
    }

    pub fn is_bmp280(&self) -> bool {
        self.chip == CHIP_ID
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
/// Settings written by `init`: 250ms standby, filter 16, pressure x4, temperature x1, normal mode.
pub fn default_config() -> ConfigFields {
    ConfigFields::new(Standby::Ms250.value(), Filter::X16.value())
}

pub fn default_ctrl_meas() -> CtrlMeasFields {
    CtrlMeasFields::new(PressureOversampling::X4.value(), TempOversampling::X1.value(), Mode::Normal.value())
}
