mod tests {
    use brightness_groups::metadata::METADATA_CAPACITY;
    use brightness_groups::{
        BrightnessGroups, BrightnessGroupsConfig, Duration, Instant, MemoryStrip, PixelStrip,
        SettingsInfo, USERMOD_ID_BRIGHTNESS_GROUPS, Usermod, UsermodManager, rgbw,
    };
    use serde_json::{Map, Value, json};

    const GREY: brightness_groups::Rgbw = rgbw(200, 200, 200, 200);

    fn grey_strip(length: usize) -> MemoryStrip {
        let mut strip = MemoryStrip::new(length);
        for pixel in 0..length {
            strip.set_pixel_color(pixel, GREY);
        }
        strip
    }

    fn settings() -> Value {
        json!({
            "BrightnessGroups": {
                "enabled": true,
                "Group 1": { "scale": 100, "pixels": "" },
                "Group 2": { "scale": 50, "pixels": "1,3,5" },
                "Group 3": { "scale": 100, "pixels": "" },
                "Group 4": { "scale": 100, "pixels": "" }
            }
        })
    }

    /// Usermod with nothing but an id
    struct Bare {
        id: u16,
    }

    impl Usermod for Bare {
        fn id(&self) -> u16 {
            self.id
        }
    }

    #[test]
    fn test_overlay_end_to_end() {
        let mut strip = grey_strip(10);
        let mut usermod = BrightnessGroups::default();

        assert!(usermod.read_from_config(&settings(), &strip));
        usermod.setup();
        assert!(usermod.is_ready());
        assert!(usermod.is_enabled());

        usermod.handle_overlay_draw(&mut strip);
        assert_eq!(strip.pixel_color(0), rgbw(100, 100, 100, 100));
        assert_eq!(strip.pixel_color(1), GREY);
        assert_eq!(strip.pixel_color(2), rgbw(100, 100, 100, 100));
        assert_eq!(strip.pixel_color(9), GREY);
    }

    #[test]
    fn test_overlay_guards() {
        let mut usermod = BrightnessGroups::default();
        let mut strip = grey_strip(10);
        usermod.read_from_config(&settings(), &strip);

        // Not set up yet
        usermod.handle_overlay_draw(&mut strip);
        assert_eq!(strip, grey_strip(10));

        usermod.setup();
        usermod.enable(false);
        usermod.handle_overlay_draw(&mut strip);
        assert_eq!(strip, grey_strip(10));

        // Never loaded
        let mut unloaded = BrightnessGroups::new(&BrightnessGroupsConfig {
            enabled: true,
            ..BrightnessGroupsConfig::default()
        });
        unloaded.setup();
        unloaded.handle_overlay_draw(&mut strip);
        assert_eq!(strip, grey_strip(10));
    }

    #[test]
    fn test_setup_keeps_default_scale() {
        let mut usermod = BrightnessGroups::default();
        assert!(!usermod.is_ready());
        usermod.setup();
        assert_eq!(usermod.table().scale(0), Some(100));
    }

    #[test]
    fn test_incomplete_config_then_save() {
        let strip = grey_strip(10);
        let mut usermod = BrightnessGroups::default();
        assert!(!usermod.read_from_config(&json!({}), &strip));
        assert!(!usermod.is_enabled());

        let mut root = Map::new();
        usermod.add_to_config(&mut root);
        let top = &root["BrightnessGroups"];
        assert_eq!(top["enabled"], json!(false));
        for group in 1..=4 {
            assert_eq!(
                top[format!("Group {}", group).as_str()],
                json!({ "scale": 100, "pixels": "" })
            );
        }
    }

    #[test]
    fn test_tick_is_coalesced() {
        let strip = grey_strip(4);
        let mut usermod = BrightnessGroups::new(&BrightnessGroupsConfig {
            enabled: true,
            tick_interval: Duration::from_millis(1000),
        });
        usermod.setup();

        usermod.tick(Instant::from_millis(500), &strip);
        assert_eq!(usermod.last_tick(), Instant::from_millis(0));

        usermod.tick(Instant::from_millis(1200), &strip);
        assert_eq!(usermod.last_tick(), Instant::from_millis(1200));

        usermod.tick(Instant::from_millis(2100), &strip);
        assert_eq!(usermod.last_tick(), Instant::from_millis(1200));

        usermod.tick(Instant::from_millis(2200), &strip);
        assert_eq!(usermod.last_tick(), Instant::from_millis(2200));
    }

    #[test]
    fn test_tick_skipped_when_disabled_or_busy() {
        let mut strip = grey_strip(4);
        let mut usermod = BrightnessGroups::default();
        usermod.setup();

        usermod.tick(Instant::from_millis(5000), &strip);
        assert_eq!(usermod.last_tick(), Instant::from_millis(0));

        usermod.enable(true);
        strip.set_updating(true);
        usermod.tick(Instant::from_millis(5000), &strip);
        assert_eq!(usermod.last_tick(), Instant::from_millis(0));

        strip.set_updating(false);
        usermod.tick(Instant::from_millis(5000), &strip);
        assert_eq!(usermod.last_tick(), Instant::from_millis(5000));
    }

    #[test]
    fn test_metadata() {
        let usermod = BrightnessGroups::default();
        let mut info = SettingsInfo::new();
        usermod.append_config_data(&mut info).unwrap();
        assert!(info.len() <= METADATA_CAPACITY);
        assert!(info.as_str().starts_with("addInfo('BrightnessGroups:group1:scale',1,'"));
        assert!(info.as_str().ends_with("');"));
    }

    #[test]
    fn test_metadata_overflow_keeps_whole_entries() {
        let mut info = SettingsInfo::new();
        let text = "x".repeat(1400);
        assert!(info.add_info("a", &text).is_ok());
        assert!(info.add_info("b", &text).is_ok());
        let before = info.len();
        assert!(info.add_info("c", &text).is_err());
        assert_eq!(info.len(), before);
        assert!(info.as_str().ends_with("');"));
    }

    #[test]
    fn test_manager() {
        let mut manager = UsermodManager::new();
        manager
            .register(Box::new(BrightnessGroups::default()))
            .ok()
            .unwrap();
        manager
            .register(Box::new(Bare { id: 7 }))
            .ok()
            .unwrap();
        assert_eq!(manager.len(), 2);

        let mut strip = grey_strip(10);
        assert!(manager.read_from_config(&settings(), &strip));
        manager.setup();
        manager.tick(Instant::from_millis(2000), &strip);
        manager.handle_overlay_draw(&mut strip);
        assert_eq!(strip.pixel_color(4), rgbw(100, 100, 100, 100));

        let groups = manager.lookup(USERMOD_ID_BRIGHTNESS_GROUPS).unwrap();
        assert!(groups.is_enabled());
        assert!(manager.lookup(8).is_none());

        manager
            .lookup_mut(USERMOD_ID_BRIGHTNESS_GROUPS)
            .unwrap()
            .enable(false);
        let mut root = Map::new();
        manager.add_to_config(&mut root);
        assert_eq!(root["BrightnessGroups"]["enabled"], json!(false));

        let mut info = SettingsInfo::new();
        manager.append_config_data(&mut info).unwrap();
        assert_eq!(info.as_str().matches("addInfo(").count(), 8);
    }

    #[test]
    fn test_manager_capacity() {
        let mut manager = UsermodManager::new();
        for id in 0..10 {
            assert!(manager.register(Box::new(Bare { id })).is_ok());
        }
        let rejected = manager.register(Box::new(Bare { id: 10 }));
        assert_eq!(rejected.err().map(|usermod| usermod.id()), Some(10));
        assert_eq!(manager.len(), 10);
    }
}
