#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use keypad_clock::config::{INITIAL_TIME, MATRIX_DEVICES, MATRIX_INTENSITY, POLL_INTERVAL_MS};
    use keypad_clock::display::{prepare_buffer, Page};
    use keypad_clock::keypad::Keypad;
    use keypad_clock::{render, ClockProvider, EditSession, SoftClock};
    use max7219::MAX7219;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock},
        fugit::{ExtU32, RateExtU32},
        gpio::{DynPinId, FunctionSioInput, FunctionSioOutput, Pin, PullDown, PullUp},
        sio::Sio,
        spi::Spi,
        timer::{Alarm, Alarm0, Timer},
        watchdog::Watchdog,
    };

    // Type definition for the MAX7219 display
    type Spi0 = Spi<rp_pico::hal::spi::Enabled, rp_pico::hal::pac::SPI0, (
        Pin<rp_pico::hal::gpio::bank0::Gpio19, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>,
        Pin<rp_pico::hal::gpio::bank0::Gpio16, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>,
        Pin<rp_pico::hal::gpio::bank0::Gpio18, rp_pico::hal::gpio::FunctionSpi, rp_pico::hal::gpio::PullDown>
    )>;
    type CsPin = Pin<rp_pico::hal::gpio::bank0::Gpio17, FunctionSioOutput, PullDown>;
    type DisplayType = MAX7219<max7219::connectors::SpiConnectorSW<Spi0, CsPin>>;

    type RowPin = Pin<DynPinId, FunctionSioInput, PullUp>;
    type ColPin = Pin<DynPinId, FunctionSioOutput, PullDown>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        display: DisplayType,
        shown: [[u8; 8]; MATRIX_DEVICES],
        keypad: Keypad<RowPin, ColPin>,
        alarm: Alarm0,
        timer: Timer,
        last_us: u64,
        clock: SoftClock,
        session: EditSession,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = timer.alarm_0().unwrap();
        alarm.schedule((POLL_INTERVAL_MS * 1_000).micros()).unwrap();
        alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let rows: [RowPin; 4] = [
            pins.gpio2.into_pull_up_input().into_dyn_pin(),
            pins.gpio3.into_pull_up_input().into_dyn_pin(),
            pins.gpio4.into_pull_up_input().into_dyn_pin(),
            pins.gpio5.into_pull_up_input().into_dyn_pin(),
        ];
        let cols: [ColPin; 3] = [
            pins.gpio6.into_push_pull_output().into_dyn_pin(),
            pins.gpio7.into_push_pull_output().into_dyn_pin(),
            pins.gpio8.into_push_pull_output().into_dyn_pin(),
        ];
        let keypad = Keypad::new(rows, cols).unwrap();

        let mosi = pins.gpio19.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let sck = pins.gpio18.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let miso = pins.gpio16.into_function::<rp_pico::hal::gpio::FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            2_000_000u32.Hz(),
            &embedded_hal::spi::MODE_0,
        );

        let mut display = MAX7219::from_spi_cs(MATRIX_DEVICES, spi, cs).unwrap();
        display.power_on().unwrap();
        for i in 0..MATRIX_DEVICES {
            display.set_intensity(i, MATRIX_INTENSITY).unwrap();
            display.clear_display(i).unwrap();
        }

        let clock = SoftClock::new(&INITIAL_TIME).unwrap();
        defmt::info!("clock started at {}", INITIAL_TIME);

        (
            Shared {},
            Local {
                display,
                shown: [[0; 8]; MATRIX_DEVICES],
                keypad,
                alarm,
                last_us: timer.get_counter().ticks(),
                timer,
                clock,
                session: EditSession::new(),
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: one iteration of the clock loop, every POLL_INTERVAL_MS
    #[task(
        binds = TIMER_IRQ_0,
        priority = 1,
        local = [alarm, timer, last_us, keypad, clock, session, display, shown]
    )]
    fn poll(ctx: poll::Context) {
        let local = ctx.local;
        local.alarm.clear_interrupt();
        local.alarm.schedule((POLL_INTERVAL_MS * 1_000).micros()).unwrap();

        // Whole milliseconds only; the remainder carries into the next poll.
        let now_us = local.timer.get_counter().ticks();
        let elapsed_ms = ((now_us - *local.last_us) / 1_000) as u32;
        *local.last_us += u64::from(elapsed_ms) * 1_000;
        local.clock.advance(elapsed_ms);

        let millis = local.clock.now_millis();
        if let Ok(Some(key)) = local.keypad.poll(millis) {
            local.session.handle_key(key, local.clock);
        }

        let frame = render(local.session, local.clock);
        let buffers = prepare_buffer(&frame, Page::select(local.session, millis));
        if buffers != *local.shown {
            let display = &mut *local.display;
            for dev_idx in 0..MATRIX_DEVICES {
                display.write_raw(dev_idx, &buffers[dev_idx]).unwrap();
            }
            *local.shown = buffers;
        }
    }
}
