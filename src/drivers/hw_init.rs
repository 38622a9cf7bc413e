//! One-shot hardware peripheral initialization.
//!
//! Configures the two GPIO lines and the GPIO ISR service using raw
//! ESP-IDF sys calls. Called once from `main()` before the poll loop
//! starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

// ── GPIO bring-up ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // Obstacle detector: input, pull-up (IR modules idle high), falling
    // edge interrupt armed later in init_isr_service().
    let obstacle_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::OBSTACLE_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    // SAFETY: called once from main() before the poll loop; single-threaded.
    let ret = unsafe { gpio_config(&obstacle_cfg) };
    if ret != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    // DHT data line: open-drain output, released high (the bus idle
    // state). The transceiver flips direction per protocol run.
    // SAFETY: same single-threaded init path.
    unsafe {
        gpio_set_direction(pins::DHT_DATA_GPIO, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
        gpio_set_level(pins::DHT_DATA_GPIO, 1);
    }

    info!("hw_init: GPIO configured (dht={}, obstacle={})", pins::DHT_DATA_GPIO, pins::OBSTACLE_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn obstacle_gpio_isr(_arg: *mut core::ffi::c_void) {
    // Nothing beyond the flag set may happen here — the handler runs in
    // interrupt context and must stay bounded and non-blocking.
    crate::sensors::obstacle::obstacle_isr_handler();
}

/// Install the per-pin GPIO ISR service and register the obstacle
/// handler. Call after [`init_peripherals`] and before the poll loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The registered handler
    // is a static function that only stores an atomic flag.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        gpio_set_intr_type(pins::OBSTACLE_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
        gpio_isr_handler_add(
            pins::OBSTACLE_GPIO,
            Some(obstacle_gpio_isr),
            core::ptr::null_mut(),
        );
        gpio_intr_enable(pins::OBSTACLE_GPIO);
    }

    info!("hw_init: ISR service installed (obstacle, falling edge)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
