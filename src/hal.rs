//! Hardware port traits and their ESP-IDF adapters.
//!
//! The protocol code is generic over these three traits so the whole
//! sensor stack compiles and tests on the host. ESP-IDF adapters wrap
//! raw `esp-idf-svc::sys` calls on the target; the [`sim`] module
//! provides a scripted waveform stand-in for host tests.

// ── Port traits ───────────────────────────────────────────────

/// A single GPIO data line whose direction can be switched at runtime.
///
/// The DHT11 wire is shared: the host drives it during the start signal,
/// then releases it (input mode, pulled high externally) so the sensor
/// can answer. At most one side drives the line at a time.
pub trait DataLine {
    /// Take output ownership of the line.
    fn set_output(&mut self);
    /// Release the line to input mode (reads follow the external level).
    fn set_input(&mut self);
    /// Drive the line while in output mode.
    fn write(&mut self, high: bool);
    /// Sample the current line level. `true` = logic high.
    fn read(&self) -> bool;
}

/// Monotonic microsecond clock. Durations are `end - start` of two
/// snapshots from the same clock instance; never compared across resets.
pub trait MonotonicClock {
    fn now_us(&self) -> i64;
}

/// Millisecond yielding sleep and microsecond busy-delay.
pub trait Delay {
    /// Sleep that yields the processor to other cooperative work.
    fn delay_ms(&mut self, ms: u32);
    /// Short busy-delay; does not yield.
    fn delay_us(&mut self, us: u32);
}

// ── ESP-IDF adapters ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{
    gpio_get_level, gpio_mode_t_GPIO_MODE_INPUT, gpio_mode_t_GPIO_MODE_OUTPUT,
    gpio_set_direction, gpio_set_level,
};

/// GPIO line adapter over the raw ESP-IDF GPIO driver.
///
/// The pin must have been configured by
/// [`hw_init::init_peripherals`](crate::drivers::hw_init::init_peripherals)
/// before use.
pub struct EspDataLine {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    pin: i32,
}

impl EspDataLine {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

#[cfg(target_os = "espidf")]
impl DataLine for EspDataLine {
    fn set_output(&mut self) {
        // SAFETY: direction change on a pin configured during hw_init;
        // only the main-loop transceiver touches this pin.
        unsafe {
            gpio_set_direction(self.pin, gpio_mode_t_GPIO_MODE_OUTPUT);
        }
    }

    fn set_input(&mut self) {
        // SAFETY: as above; input mode releases the open-drain wire.
        unsafe {
            gpio_set_direction(self.pin, gpio_mode_t_GPIO_MODE_INPUT);
        }
    }

    fn write(&mut self, high: bool) {
        // SAFETY: level write on an output-configured pin, main loop only.
        unsafe {
            gpio_set_level(self.pin, u32::from(high));
        }
    }

    fn read(&self) -> bool {
        // SAFETY: gpio_get_level is a read-only register access.
        (unsafe { gpio_get_level(self.pin) }) != 0
    }
}

#[cfg(not(target_os = "espidf"))]
impl DataLine for EspDataLine {
    fn set_output(&mut self) {}
    fn set_input(&mut self) {}
    fn write(&mut self, _high: bool) {}
    fn read(&self) -> bool {
        true
    }
}

/// Monotonic clock adapter.
///
/// - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` (µs since
///   boot, monotonic).
/// - **host** — `std::time::Instant` since construction.
pub struct EspClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for EspClock {
    fn default() -> Self {
        Self::new()
    }
}

impl EspClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(target_os = "espidf")]
impl MonotonicClock for EspClock {
    fn now_us(&self) -> i64 {
        // SAFETY: esp_timer_get_time is a counter read, callable anywhere.
        unsafe { esp_idf_svc::sys::esp_timer_get_time() }
    }
}

#[cfg(not(target_os = "espidf"))]
impl MonotonicClock for EspClock {
    fn now_us(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }
}

/// Delay adapter: FreeRTOS yielding sleep for milliseconds, ROM
/// busy-spin for microseconds.
pub struct EspDelay;

impl Default for EspDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl EspDelay {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl Delay for EspDelay {
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    fn delay_us(&mut self, us: u32) {
        esp_idf_hal::delay::Ets::delay_us(us);
    }
}

#[cfg(not(target_os = "espidf"))]
impl Delay for EspDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(u64::from(us)));
    }
}

// ── Host-side waveform simulator ──────────────────────────────

/// Scripted single-wire bus for host tests.
///
/// Time is virtual: each [`DataLine::read`] advances it by one
/// microsecond (modelling the poll cost), delays advance it in bulk,
/// and the clock only observes it. A waveform — `(duration_us, level)`
/// segments — starts playing the moment the host releases the line;
/// past the last segment the line reads idle-high. Releasing the line
/// again re-arms the waveform, so one bus can serve several read
/// cycles.
#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use super::{DataLine, Delay, MonotonicClock};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    pub struct SimBus {
        now_us: Cell<i64>,
        waveform: RefCell<Vec<(i64, bool)>>,
        released_at: Cell<Option<i64>>,
        /// `Some(level)` while the host owns and drives the line.
        host_drive: Cell<Option<bool>>,
    }

    impl SimBus {
        /// A bus that will play `waveform` once the host releases the line.
        pub fn new(waveform: Vec<(i64, bool)>) -> Rc<Self> {
            Rc::new(Self {
                now_us: Cell::new(0),
                waveform: RefCell::new(waveform),
                released_at: Cell::new(None),
                host_drive: Cell::new(None),
            })
        }

        /// Split the bus into the three port handles the transceiver needs.
        pub fn ports(self: &Rc<Self>) -> (SimLine, SimClock, SimDelay) {
            (
                SimLine(Rc::clone(self)),
                SimClock(Rc::clone(self)),
                SimDelay(Rc::clone(self)),
            )
        }

        fn level_at(&self, t: i64) -> bool {
            if let Some(level) = self.host_drive.get() {
                return level;
            }
            let Some(t0) = self.released_at.get() else {
                return true; // undriven, pulled high
            };
            let mut edge = t0;
            for &(duration, level) in self.waveform.borrow().iter() {
                edge += duration;
                if t < edge {
                    return level;
                }
            }
            true // waveform exhausted, back to idle-high
        }
    }

    pub struct SimLine(Rc<SimBus>);

    impl DataLine for SimLine {
        fn set_output(&mut self) {
            self.0.host_drive.set(Some(true));
        }

        fn set_input(&mut self) {
            self.0.host_drive.set(None);
            // Re-arm the waveform from the moment of release.
            self.0.released_at.set(Some(self.0.now_us.get()));
        }

        fn write(&mut self, high: bool) {
            self.0.host_drive.set(Some(high));
        }

        fn read(&self) -> bool {
            let t = self.0.now_us.get() + 1;
            self.0.now_us.set(t);
            self.0.level_at(t)
        }
    }

    pub struct SimClock(Rc<SimBus>);

    impl MonotonicClock for SimClock {
        fn now_us(&self) -> i64 {
            self.0.now_us.get()
        }
    }

    pub struct SimDelay(Rc<SimBus>);

    impl Delay for SimDelay {
        fn delay_ms(&mut self, ms: u32) {
            let t = self.0.now_us.get();
            self.0.now_us.set(t + i64::from(ms) * 1000);
        }

        fn delay_us(&mut self, us: u32) {
            let t = self.0.now_us.get();
            self.0.now_us.set(t + i64::from(us));
        }
    }
}
