mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    use embassy_time::{Duration, Instant};
    use strand_animator::{
        CancelToken, Command, CommandQueue, DriverError, EffectId, FrameScheduler,
        Mode, Rgb, SchedulerConfig, SchedulerError, SchedulerState, StripDriver,
        Surface,
    };

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };

    /// Driver that records every flushed frame and can be told to fail.
    #[derive(Clone)]
    struct MockDriver {
        frames: Rc<RefCell<Vec<Vec<Rgb>>>>,
        fail_with: Rc<RefCell<Option<DriverError>>>,
    }

    impl MockDriver {
        fn new() -> Self {
            Self {
                frames: Rc::new(RefCell::new(Vec::new())),
                fail_with: Rc::new(RefCell::new(None)),
            }
        }

        fn last_frame(&self) -> Vec<Rgb> {
            self.frames.borrow().last().cloned().unwrap_or_default()
        }

        fn frame_count(&self) -> usize {
            self.frames.borrow().len()
        }

        fn fail_next(&self, err: DriverError) {
            *self.fail_with.borrow_mut() = Some(err);
        }
    }

    impl StripDriver for MockDriver {
        fn write(&mut self, colors: &[Rgb]) -> Result<(), DriverError> {
            if let Some(err) = self.fail_with.borrow_mut().take() {
                return Err(err);
            }
            self.frames.borrow_mut().push(colors.to_vec());
            Ok(())
        }
    }

    fn config(effect: EffectId) -> SchedulerConfig {
        SchedulerConfig {
            effect,
            brightness: 255,
            frame_duration: Duration::from_millis(20),
            seed: 1,
        }
    }

    fn lit(frame: &[Rgb]) -> Vec<usize> {
        frame
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != BLACK)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_first_tick_starts_the_configured_effect() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::TheaterChase),
        );

        assert_eq!(scheduler.state(), SchedulerState::Idle);
        scheduler.tick(Instant::from_millis(0)).unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Running);
        assert_eq!(lit(&driver.last_frame()), vec![0, 3, 6]);
        assert!(driver.last_frame()[0] == RED);
    }

    #[test]
    fn test_switchover_never_interleaves_writes() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::ColorWipe),
        );

        // Let the wipe paint a few green pixels.
        for t in 0..4u64 {
            scheduler.tick(Instant::from_millis(t * 20)).unwrap();
        }
        assert!(driver.last_frame().contains(&GREEN));

        // Switch to the chase: the next tick must show only the
        // stop-clear plus the chase's own writes, no green residue.
        scheduler.select(EffectId::TheaterChase);
        scheduler.tick(Instant::from_millis(100)).unwrap();

        let frame = driver.last_frame();
        assert!(!frame.contains(&GREEN));
        assert_eq!(lit(&frame), vec![0, 3, 6]);
        assert_eq!(scheduler.selected(), EffectId::TheaterChase);
    }

    #[test]
    fn test_back_to_back_selects_land_on_the_last_one() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::Breathe),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();

        scheduler.select(EffectId::ColorWipe);
        scheduler.select(EffectId::TheaterChase);
        scheduler.tick(Instant::from_millis(20)).unwrap();

        assert_eq!(scheduler.selected(), EffectId::TheaterChase);
        let frame = driver.last_frame();
        assert!(!frame.contains(&GREEN));
        assert_eq!(lit(&frame), vec![0, 3, 6]);
    }

    #[test]
    fn test_unknown_effect_is_reported_and_ignored() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::TheaterChase),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();

        let err = scheduler.select_raw(200).unwrap_err();
        assert_eq!(err, SchedulerError::UnknownEffect(200));
        assert_eq!(scheduler.selected(), EffectId::TheaterChase);

        // Still running the old effect.
        scheduler.tick(Instant::from_millis(20)).unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Running);
        assert_eq!(lit(&driver.last_frame()), vec![1, 4, 7]);
    }

    #[test]
    fn test_stop_blacks_the_surface_and_idles() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::TheaterChase),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();

        scheduler.stop();
        scheduler.tick(Instant::from_millis(20)).unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(driver.last_frame().iter().all(|c| *c == BLACK));

        // Repeated stops are no-ops.
        scheduler.stop();
        scheduler.stop();
        scheduler.tick(Instant::from_millis(40)).unwrap();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn test_toggle_powers_off_and_back_on() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::TheaterChase),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();

        queue.sender().try_send(Command::Toggle).unwrap();
        scheduler.tick(Instant::from_millis(20)).unwrap();
        assert!(!scheduler.is_powered());
        assert!(driver.last_frame().iter().all(|c| *c == BLACK));

        queue.sender().try_send(Command::Toggle).unwrap();
        scheduler.tick(Instant::from_millis(40)).unwrap();
        assert!(scheduler.is_powered());
        // The selected effect restarted from its reset state.
        assert_eq!(lit(&driver.last_frame()), vec![0, 3, 6]);
    }

    #[test]
    fn test_next_and_previous_commands_walk_the_catalog() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::Breathe),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();

        queue.sender().try_send(Command::Next).unwrap();
        scheduler.tick(Instant::from_millis(20)).unwrap();
        assert_eq!(scheduler.selected(), EffectId::Pacifica);

        queue.sender().try_send(Command::Previous).unwrap();
        queue.sender().try_send(Command::Previous).unwrap();
        scheduler.tick(Instant::from_millis(40)).unwrap();
        assert_eq!(scheduler.selected(), EffectId::Strobe);
    }

    #[test]
    fn test_transient_driver_failure_drops_one_frame() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::TheaterChase),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();
        let frames_before = driver.frame_count();

        driver.fail_next(DriverError::Transient);
        scheduler.tick(Instant::from_millis(20)).unwrap();
        assert_eq!(driver.frame_count(), frames_before);
        assert_eq!(scheduler.state(), SchedulerState::Running);

        // Rendering resumes on the next tick.
        scheduler.tick(Instant::from_millis(40)).unwrap();
        assert_eq!(driver.frame_count(), frames_before + 1);
    }

    #[test]
    fn test_fatal_driver_failure_idles_the_scheduler() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::TheaterChase),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();

        driver.fail_next(DriverError::Fatal);
        let err = scheduler.tick(Instant::from_millis(20)).unwrap_err();
        assert_eq!(err, SchedulerError::Driver(DriverError::Fatal));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn test_static_mode_fills_and_steps_hue() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::TheaterChase),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();

        queue.sender().try_send(Command::ModeStatic).unwrap();
        scheduler.tick(Instant::from_millis(20)).unwrap();
        assert_eq!(scheduler.mode(), Mode::Static);
        let solid = driver.last_frame();
        assert!(solid.iter().all(|c| *c == solid[0]));
        assert_ne!(solid[0], BLACK);

        // Next steps the hue, not the effect selection.
        queue.sender().try_send(Command::Next).unwrap();
        scheduler.tick(Instant::from_millis(40)).unwrap();
        assert_ne!(driver.last_frame()[0], solid[0]);
        assert_eq!(scheduler.selected(), EffectId::TheaterChase);

        // Back to animation mode restarts the selected effect.
        queue.sender().try_send(Command::ModeAnimation).unwrap();
        scheduler.tick(Instant::from_millis(60)).unwrap();
        assert_eq!(scheduler.mode(), Mode::Animation);
        assert_eq!(lit(&driver.last_frame()), vec![0, 3, 6]);
    }

    #[test]
    fn test_brightness_commands_scale_the_output() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<16>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::TheaterChase),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();
        assert_eq!(driver.last_frame()[0], RED);

        // 255 -> 0 in steps of 20 saturates at zero.
        for _ in 0..13 {
            queue.sender().try_send(Command::BrightnessDown).unwrap();
        }
        scheduler.tick(Instant::from_millis(20)).unwrap();
        assert_eq!(scheduler.brightness(), 0);
        assert!(driver.last_frame().iter().all(|c| *c == BLACK));

        queue.sender().try_send(Command::BrightnessUp).unwrap();
        scheduler.tick(Instant::from_millis(40)).unwrap();
        assert_eq!(scheduler.brightness(), 20);
        assert!(driver.last_frame().iter().any(|c| *c != BLACK));
    }

    #[test]
    fn test_frame_pacing_never_sleeps_negative() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver, 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::Breathe),
        );

        let result = scheduler.tick(Instant::from_millis(0)).unwrap();
        assert!(result.sleep_duration.as_millis() <= 20);

        // Arriving very late: drift correction resets the deadline
        // instead of demanding a catch-up burst.
        let result = scheduler.tick(Instant::from_millis(5000)).unwrap();
        assert!(result.sleep_duration.as_millis() <= 20);
        assert!(result.next_deadline.as_millis() >= 5000);
    }

    #[test]
    fn test_select_command_by_raw_id() {
        let driver = MockDriver::new();
        let queue = CommandQueue::<8>::new();
        let cancel = CancelToken::new();
        let surface = Surface::<_, 16>::new(driver.clone(), 9);
        let mut scheduler = FrameScheduler::new(
            surface,
            queue.receiver(),
            &cancel,
            &config(EffectId::Breathe),
        );
        scheduler.tick(Instant::from_millis(0)).unwrap();

        queue
            .sender()
            .try_send(Command::Select(EffectId::TheaterChase as u8))
            .unwrap();
        // An out-of-range id in the same batch is ignored.
        queue.sender().try_send(Command::Select(250)).unwrap();
        scheduler.tick(Instant::from_millis(20)).unwrap();

        assert_eq!(scheduler.selected(), EffectId::TheaterChase);
        assert_eq!(lit(&driver.last_frame()), vec![0, 3, 6]);
    }
}
