use log::debug;

use bmp280_err::Result;
use crate::bus::Bus;
use crate::registers::*;
use crate::transport::Transport;

/// Factory trimming read from 0x88..0x9F, unique to each chip
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Calibration {
    pub dig_t1 : u16,
    pub dig_t2 : i16,
    pub dig_t3 : i16,
    pub dig_p1 : u16,
    pub dig_p2 : i16,
    pub dig_p3 : i16,
    pub dig_p4 : i16,
    pub dig_p5 : i16,
    pub dig_p6 : i16,
    pub dig_p7 : i16,
    pub dig_p8 : i16,
    pub dig_p9 : i16,
}


//----------------------------------------------------------------------------------------------------------------------------------
impl Calibration {

    //------------------------------------------------------------------------------------------------------------------------------
    /// One 2-byte read per coefficient. The first failing read aborts the load.
    pub fn load<B: Bus>(transport : &mut Transport<B>) -> Result<Self> {
        let cal = Self {
            dig_t1 : read_word(transport, DIG_T1_REG)?,
            dig_t2 : read_word(transport, DIG_T2_REG)? as i16,
            dig_t3 : read_word(transport, DIG_T3_REG)? as i16,
            dig_p1 : read_word(transport, DIG_P1_REG)?,
            dig_p2 : read_word(transport, DIG_P2_REG)? as i16,
            dig_p3 : read_word(transport, DIG_P3_REG)? as i16,
            dig_p4 : read_word(transport, DIG_P4_REG)? as i16,
            dig_p5 : read_word(transport, DIG_P5_REG)? as i16,
            dig_p6 : read_word(transport, DIG_P6_REG)? as i16,
            dig_p7 : read_word(transport, DIG_P7_REG)? as i16,
            dig_p8 : read_word(transport, DIG_P8_REG)? as i16,
            dig_p9 : read_word(transport, DIG_P9_REG)? as i16,
        };

        debug!("dig_T 0x{:x}, 0x{:x}, 0x{:x}", cal.dig_t1, cal.dig_t2, cal.dig_t3);
        debug!("dig_P 0x{:x}, 0x{:x}, 0x{:x}, 0x{:x}, 0x{:x}, 0x{:x}, 0x{:x}, 0x{:x}, 0x{:x}",
            cal.dig_p1, cal.dig_p2, cal.dig_p3, cal.dig_p4, cal.dig_p5, cal.dig_p6, cal.dig_p7, cal.dig_p8, cal.dig_p9);
        Ok(cal)
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
fn read_word<B: Bus>(transport : &mut Transport<B>, address : u8) -> Result<u16> {
    let frame = transport.read(address, 2)?;
    // little-endian, frame[0] is the address echo
    Ok(((frame[2] as u16) << 8) | (frame[1] as u16))
}
