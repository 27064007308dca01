//!
//! Entry points for collaborators that drive the sensor through return codes
//!

use log::debug;

use bmp280_err::{Bmp280Error, ErrorKind, Result, ReturnCode, NO_ERROR};
use crate::bus::{Bus, SpidevBus};
use crate::compensation::Measurement;
use crate::registers::{ChipId, ConfigFields, CtrlMeasFields, StatusFields};
use crate::Bmp280;

//----------------------------------------------------------------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Uninitialized,
    Initializing,
    Ready,
}


//----------------------------------------------------------------------------------------------------------------------------------
pub struct Session<B: Bus = SpidevBus> {
    state : State,
    device : Option<Bmp280<B>>,
}


//----------------------------------------------------------------------------------------------------------------------------------
impl<B: Bus> Default for Session<B> {
    fn default() -> Self {
        Self::new()
    }
}


//----------------------------------------------------------------------------------------------------------------------------------
impl<B: Bus> Session<B> {

    //------------------------------------------------------------------------------------------------------------------------------
    pub fn new() -> Self {
        Self {
            state : State::Uninitialized,
            device : None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn init(&mut self, bus_path : &str) -> Result<ReturnCode> {
        if self.state != State::Uninitialized {
            return Err(Bmp280Error::new(ErrorKind::InvalidState, "BMP280 is already initialized; call deinit() first"));
        }

        self.state = State::Initializing;
        match Bmp280::init(bus_path) {
            Ok(device) => {
                self.device = Some(device);
                self.state = State::Ready;
                debug!("BMP280 on {} ready", bus_path);
                Ok(NO_ERROR)
            },
            Err(error) => {
                self.state = State::Uninitialized;
                Err(error)
            }
        }
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn deinit(&mut self) -> Result<ReturnCode> {
        let device = match self.device.take() {
            Some(device) => device,
            None => return Err(Self::not_ready())
        };
        self.state = State::Uninitialized;
        device.deinit()?;
        Ok(NO_ERROR)
    }


    //------------------------------------------------------------------------------------------------------------------------------
    pub fn measure(&mut self) -> Result<Measurement> {
        self.ready()?.measure()
    }

    pub fn get_config(&mut self) -> Result<ConfigFields> {
        self.ready()?.get_config()
    }

    pub fn set_config(&mut self, standby : u8, filter_coefficient : u8) -> Result<ReturnCode> {
        self.ready()?.set_config(standby, filter_coefficient)?;
        Ok(NO_ERROR)
    }

    pub fn get_ctrl_meas(&mut self) -> Result<CtrlMeasFields> {
        self.ready()?.get_ctrl_meas()
    }

    pub fn set_ctrl_meas(&mut self, osrs_p : u8, osrs_t : u8, mode : u8) -> Result<ReturnCode> {
        self.ready()?.set_ctrl_meas(osrs_p, osrs_t, mode)?;
        Ok(NO_ERROR)
    }

    pub fn get_status(&mut self) -> Result<StatusFields> {
        self.ready()?.get_status()
    }

    pub fn get_chip_id(&mut self) -> Result<ChipId> {
        self.ready()?.get_chip_id()
    }


    //------------------------------------------------------------------------------------------------------------------------------
    fn ready(&mut self) -> Result<&mut Bmp280<B>> {
        match (self.state, self.device.as_mut()) {
            (State::Ready, Some(device)) => Ok(device),
            _ => Err(Self::not_ready())
        }
    }

    fn not_ready() -> Bmp280Error {
        Bmp280Error::new(ErrorKind::InvalidState, "BMP280 is not initialized; did you run init() first?")
    }
}
