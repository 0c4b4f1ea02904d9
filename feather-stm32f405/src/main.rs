#![deny(unsafe_code)]
#![deny(warnings)]
#![no_main]
#![no_std]

use defmt_rtt as _; // global logger
use panic_probe as _;
use rtic::app;
use rtic_monotonics::stm32::prelude::*;

mod display;

stm32_tim2_monotonic!(Mono, 1_000_000);

/// Milliseconds since `Mono::start`
fn uptime_ms() -> u64 {
    Mono::now().duration_since_epoch().to_millis()
}

#[app(device = embassy_stm32, peripherals = true, dispatchers = [USART1, USART2, USART3])]
mod app {
    use super::*;
    use clock_core::{ButtonId, ClockConfig, Controller, FixedOffsetCatalog};
    use defmt::info;
    use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
    use embassy_stm32::i2c::{self, I2c};
    use embassy_stm32::mode::Blocking;
    use embassy_stm32::rcc::{Hse, HseMode};
    use embassy_stm32::spi::{self, Spi};
    use embassy_stm32::time::Hertz;
    use hal_abstractions::ds3231::Ds3231;
    use hal_abstractions::{Button, ButtonConfig};

    use display::SegmentModule;

    type Clock = Controller<Ds3231<I2c<'static, Blocking>>, FixedOffsetCatalog<'static>, SegmentModule>;

    #[shared]
    struct Shared {
        clock: Clock,
    }

    #[local]
    struct Local {
        mode_pin: Input<'static>,
        change_pin: Input<'static>,
        mode_button: Button,
        change_button: Button,
    }

    #[init]
    fn init(_cx: init::Context) -> (Shared, Local) {
        info!("LED clock starting...");

        // Adafruit Feather STM32F405: 12 MHz HSE
        let mut config = embassy_stm32::Config::default();
        config.rcc.hse = Some(Hse {
            freq: Hertz(12_000_000),
            mode: HseMode::Oscillator,
        });

        // HSE (12 MHz) / PREDIV(6) = 2 MHz (PLL input)
        // 2 MHz * MUL(168) = 336 MHz (VCO)
        // VCO / DIVP(4) = 84 MHz (SYSCLK)
        config.rcc.pll_src = embassy_stm32::rcc::PllSource::HSE;
        config.rcc.pll = Some(embassy_stm32::rcc::Pll {
            prediv: embassy_stm32::rcc::PllPreDiv::DIV6,
            mul: embassy_stm32::rcc::PllMul::MUL168,
            divp: Some(embassy_stm32::rcc::PllPDiv::DIV4),
            divq: Some(embassy_stm32::rcc::PllQDiv::DIV7),
            divr: None,
        });
        config.rcc.sys = embassy_stm32::rcc::Sysclk::PLL1_P;
        config.rcc.ahb_pre = embassy_stm32::rcc::AHBPrescaler::DIV1; // 84 MHz
        config.rcc.apb1_pre = embassy_stm32::rcc::APBPrescaler::DIV2; // 42 MHz
        config.rcc.apb2_pre = embassy_stm32::rcc::APBPrescaler::DIV1; // 84 MHz

        let p = embassy_stm32::init(config);

        // TIM2 on APB1: timer clock = 2*APB1 when prescaler != 1
        let timer_clock_hz = 84_000_000;
        Mono::start(timer_clock_hz);
        info!("TIM2 monotonic timer initialized at 1 MHz");

        // DS3231 on I2C1 (SCL=PB6, SDA=PB7)
        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = Hertz(100_000);
        let rtc = Ds3231::new(I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c_config));

        // MAX7219 on SPI2 (SCK=PB13, MOSI=PB15), CS on PC6
        let mut spi_config = spi::Config::default();
        spi_config.frequency = Hertz(1_000_000);
        let spi = Spi::new_blocking_txonly(p.SPI2, p.PB13, p.PB15, spi_config);
        let cs = Output::new(p.PC6, Level::High, Speed::VeryHigh);
        let Ok(module) = SegmentModule::new(spi, cs) else {
            defmt::panic!("MAX7219 init failed");
        };

        let clock_config = ClockConfig::default();
        let mut clock = Controller::new(rtc, FixedOffsetCatalog::default(), module, &clock_config);
        clock.setup(uptime_ms());
        clock.log_status();

        // Buttons are active low
        let mode_pin = Input::new(p.PC2, Pull::Up);
        let change_pin = Input::new(p.PC3, Pull::Up);

        buttons::spawn(clock_config.input_poll_ms).ok();
        time_sync::spawn(clock_config.time_sync_ms).ok();
        temperature::spawn(clock_config.temperature_ms).ok();
        blink::spawn(clock_config.blink_ms).ok();
        render::spawn(clock_config.render_ms).ok();
        flush::spawn(clock_config.flush_ms).ok();
        status::spawn(clock_config.status_ms).ok();
        if let Some(period_ms) = clock_config.rtc_resync_ms {
            rtc_resync::spawn(period_ms).ok();
        }

        (
            Shared { clock },
            Local {
                mode_pin,
                change_pin,
                mode_button: Button::new(ButtonConfig::default()),
                change_button: Button::new(ButtonConfig::default()),
            },
        )
    }

    /// Sample both buttons and feed classified events to the controller
    #[task(priority = 1, shared = [clock], local = [mode_pin, change_pin, mode_button, change_button])]
    async fn buttons(mut cx: buttons::Context, period_ms: u32) {
        loop {
            let now = uptime_ms();
            let mode = cx
                .local
                .mode_button
                .check(cx.local.mode_pin.is_low(), now as u32);
            let change = cx
                .local
                .change_button
                .check(cx.local.change_pin.is_low(), now as u32);

            if mode.is_some() || change.is_some() {
                cx.shared.clock.lock(|clock| {
                    if let Some(event) = mode {
                        clock.handle_button(ButtonId::Mode, event, now);
                    }
                    if let Some(event) = change {
                        clock.handle_button(ButtonId::Change, event, now);
                    }
                });
            }
            Mono::delay(u64::from(period_ms).millis()).await;
        }
    }

    /// Copy wall-clock time into the committed snapshot
    #[task(priority = 1, shared = [clock])]
    async fn time_sync(mut cx: time_sync::Context, period_ms: u32) {
        loop {
            let now = uptime_ms();
            cx.shared.clock.lock(|clock| clock.sync_system_time(now));
            Mono::delay(u64::from(period_ms).millis()).await;
        }
    }

    #[task(priority = 1, shared = [clock])]
    async fn temperature(mut cx: temperature::Context, period_ms: u32) {
        loop {
            Mono::delay(u64::from(period_ms).millis()).await;
            cx.shared.clock.lock(|clock| clock.read_temperature().ok());
        }
    }

    #[task(priority = 1, shared = [clock])]
    async fn blink(mut cx: blink::Context, period_ms: u32) {
        loop {
            cx.shared.clock.lock(|clock| clock.blink());
            Mono::delay(u64::from(period_ms).millis()).await;
        }
    }

    #[task(priority = 1, shared = [clock])]
    async fn render(mut cx: render::Context, period_ms: u32) {
        loop {
            cx.shared.clock.lock(|clock| clock.render());
            Mono::delay(u64::from(period_ms).millis()).await;
        }
    }

    #[task(priority = 1, shared = [clock])]
    async fn flush(mut cx: flush::Context, period_ms: u32) {
        loop {
            cx.shared.clock.lock(|clock| clock.flush());
            Mono::delay(u64::from(period_ms).millis()).await;
        }
    }

    /// Pull the wall clock back onto the RTC to cancel crystal drift
    #[task(priority = 1, shared = [clock])]
    async fn rtc_resync(mut cx: rtc_resync::Context, period_ms: u32) {
        loop {
            Mono::delay(u64::from(period_ms).millis()).await;
            let now = uptime_ms();
            cx.shared.clock.lock(|clock| {
                if clock.resync_from_rtc(now).is_ok() {
                    info!("Wall clock resynced from RTC");
                    clock.sync_system_time(now);
                }
            });
        }
    }

    #[task(priority = 1, shared = [clock])]
    async fn status(mut cx: status::Context, period_ms: u32) {
        loop {
            Mono::delay(u64::from(period_ms).millis()).await;
            cx.shared.clock.lock(|clock| clock.log_status());
        }
    }

    /// RTIC idle task - WFI sleep mode when no tasks active
    #[idle]
    fn idle(_cx: idle::Context) -> ! {
        info!("Idle task started - entering WFI loop");
        loop {
            cortex_m::asm::wfi();
        }
    }
}
