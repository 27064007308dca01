//!
//! In-memory stand-in for a BMP280 on the SPI bus
//!

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::bus::{Bus, BusParams};
use crate::calibration::Calibration;
use crate::registers::{PRESS_LSB, PRESS_MSB, PRESS_XLSB, TEMP_LSB, TEMP_MSB, TEMP_XLSB};

pub const MISSING_DEVICE : &str = "/dev/spidev-missing";

thread_local! {
    static NEXT_BUS : RefCell<Option<MockBus>> = RefCell::new(None);
}

//----------------------------------------------------------------------------------------------------------------------------------
struct MockState {
    registers : [u8; 256],
    transactions : Vec<Vec<u8>>,
    params : Option<BusParams>,
    fail_transfer_at : Option<u8>,
    fail_configure : bool,
    fail_close : bool,
    closed : bool,
}


//----------------------------------------------------------------------------------------------------------------------------------
#[derive(Clone)]
pub struct MockBus {
    state : Rc<RefCell<MockState>>
}


//----------------------------------------------------------------------------------------------------------------------------------
impl MockBus {

    //------------------------------------------------------------------------------------------------------------------------------
    pub fn new() -> Self {
        Self {
            state : Rc::new(RefCell::new(MockState {
                registers : [0; 256],
                transactions : Vec::new(),
                params : None,
                fail_transfer_at : None,
                fail_configure : false,
                fail_close : false,
                closed : false,
            }))
        }
    }


    //------------------------------------------------------------------------------------------------------------------------------
    /// A powered-up BMP280 carrying the datasheet example trimming.
    pub fn bmp280() -> Self {
        let bus = Self::new();
        bus.set_register(0xD0, 0x58);
        bus.set_calibration(&example_calibration());
        bus
    }


    //------------------------------------------------------------------------------------------------------------------------------
    /// Makes the next `MockBus::open` hand out this bus.
    pub fn install(&self) {
        NEXT_BUS.with(|next| *next.borrow_mut() = Some(self.clone()));
    }

    pub fn set_register(&self, address : u8, value : u8) {
        self.state.borrow_mut().registers[(address | 0x80) as usize] = value;
    }

    pub fn register(&self, address : u8) -> u8 {
        self.state.borrow().registers[(address | 0x80) as usize]
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn set_calibration(&self, cal : &Calibration) {
        let words : [u16; 12] = [
            cal.dig_t1, cal.dig_t2 as u16, cal.dig_t3 as u16,
            cal.dig_p1, cal.dig_p2 as u16, cal.dig_p3 as u16, cal.dig_p4 as u16, cal.dig_p5 as u16,
            cal.dig_p6 as u16, cal.dig_p7 as u16, cal.dig_p8 as u16, cal.dig_p9 as u16,
        ];
        for (index, word) in words.iter().enumerate() {
            let address = 0x88 + 2 * index as u8;
            self.set_register(address, (word & 0xFF) as u8);
            self.set_register(address + 1, (word >> 8) as u8);
        }
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn set_raw_temperature(&self, raw : i32) {
        self.set_raw([TEMP_MSB, TEMP_LSB, TEMP_XLSB], raw);
    }

    pub fn set_raw_pressure(&self, raw : i32) {
        self.set_raw([PRESS_MSB, PRESS_LSB, PRESS_XLSB], raw);
    }


    //------------------------------------------------------------------------------------------------------------------------------
    /// Loads a 20-bit raw code into MSB, LSB and XLSB[7:4].
    fn set_raw(&self, addresses : [u8; 3], raw : i32) {
        let value = (raw as u32) << 4;
        self.set_register(addresses[0], (value >> 16) as u8);
        self.set_register(addresses[1], (value >> 8) as u8);
        self.set_register(addresses[2], value as u8);
    }

    pub fn fail_transfer_at(&self, address : u8) {
        self.state.borrow_mut().fail_transfer_at = Some(address | 0x80);
    }

    pub fn fail_configure(&self) {
        self.state.borrow_mut().fail_configure = true;
    }

    pub fn fail_close(&self) {
        self.state.borrow_mut().fail_close = true;
    }

    pub fn transactions(&self) -> Vec<Vec<u8>> {
        self.state.borrow().transactions.clone()
    }

    pub fn params(&self) -> Option<BusParams> {
        self.state.borrow().params
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
impl Bus for MockBus {

    //------------------------------------------------------------------------------------------------------------------------------
    fn open(path : &str) -> io::Result<Self> {
        let installed = NEXT_BUS.with(|next| next.borrow_mut().take());
        match installed {
            Some(bus) if path != MISSING_DEVICE => Ok(bus),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, format!("no such device {}", path)))
        }
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn configure(&mut self, params : &BusParams) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_configure {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "SPI_IOC_WR_MODE rejected"));
        }
        state.params = Some(*params);
        Ok(())
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn exchange(&mut self, tx : &[u8], rx : &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        state.transactions.push(tx.to_vec());

        let address = tx[0] | 0x80;
        if state.fail_transfer_at == Some(address) {
            return Ok(tx.len() - 1);
        }

        rx[0] = 0xFF;
        if tx[0] & 0x80 != 0 {
            for offset in 1..tx.len() {
                rx[offset] = state.registers[(address as usize + offset - 1) & 0xFF];
            }
        } else {
            for (offset, value) in tx[1..].iter().enumerate() {
                state.registers[(address as usize + offset) & 0xFF] = *value;
            }
        }
        Ok(tx.len())
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn close(self) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.closed = true;
        if state.fail_close {
            return Err(io::Error::new(io::ErrorKind::Other, "close failed"));
        }
        Ok(())
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
/// Trimming values from the datasheet's worked compensation example.
pub fn example_calibration() -> Calibration {
    Calibration {
        dig_t1 : 27504, dig_t2 : 26435, dig_t3 : -1000,
        dig_p1 : 36477, dig_p2 : -10685, dig_p3 : 3024, dig_p4 : 2855, dig_p5 : 140,
        dig_p6 : -7, dig_p7 : 15500, dig_p8 : -14600, dig_p9 : 6000,
    }
}
