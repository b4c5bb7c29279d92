use springsim::{PhysicsError, Scheme, SpringBank, SpringConfig, SpringParameter};
use wasm_bindgen::prelude::*;

fn to_js(err: PhysicsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ---- Springs Demo ----

/// Four springs, one per integration scheme, under one frame clock.
#[wasm_bindgen]
pub struct SpringsDemo {
    bank: SpringBank<f64>,
}

#[wasm_bindgen]
impl SpringsDemo {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SpringsDemo, JsValue> {
        let bank = SpringBank::new(&SpringConfig::demo()).map_err(to_js)?;
        Ok(SpringsDemo { bank })
    }

    /// Advance by one animation frame, in seconds.
    pub fn update(&mut self, frame_delta: f64) -> Result<(), JsValue> {
        self.bank.update(frame_delta).map_err(to_js)
    }

    /// Single-step every spring.
    pub fn step(&mut self) -> Result<(), JsValue> {
        self.bank.step().map_err(to_js)
    }

    pub fn reset(&mut self) {
        self.bank.reset();
    }

    /// Slider index: 0 mass, 1 stiffness, 2 damping, 3 gravity, 4 time step.
    pub fn set_parameter(&mut self, index: u32, value: f64) -> Result<(), JsValue> {
        let parameter = match index {
            0 => SpringParameter::Mass,
            1 => SpringParameter::Stiffness,
            2 => SpringParameter::Damping,
            3 => SpringParameter::Gravity,
            4 => SpringParameter::TimeStep,
            _ => return Err(JsValue::from_str("unknown parameter index")),
        };
        self.bank.set_parameter(parameter, value).map_err(to_js)
    }

    pub fn set_initial_position(&mut self, position: f64) {
        self.bank.set_initial_position(position);
        self.bank.reset();
    }

    /// Returns [euler, midpoint, rk4, implicit] positions.
    pub fn positions(&self) -> Vec<f64> {
        self.bank.positions().to_vec()
    }

    /// Returns [euler, midpoint, rk4, implicit] velocities.
    pub fn velocities(&self) -> Vec<f64> {
        self.bank.iter().map(|(_, spring)| spring.velocity()).collect()
    }

    /// Display name of the scheme at `index`, in `positions` order.
    pub fn scheme_name(index: usize) -> Option<String> {
        Scheme::ALL.get(index).map(|s| s.name().to_string())
    }
}
