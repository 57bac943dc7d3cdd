//! Alias table for `EV_KEY` codes with more than one name.
//!
//! Source: `include/uapi/linux/input-event-codes.h`.  Names within an entry
//! are sorted alphabetically; entries are sorted by code for binary search.

const KEYCODE_ALIASES: &[(u16, &[&str])] = &[
    (113, &["KEY_MIN_INTERESTING", "KEY_MUTE"]),
    (122, &["KEY_HANGEUL", "KEY_HANGUEL"]),
    (152, &["KEY_COFFEE", "KEY_SCREENLOCK"]),
    (153, &["KEY_DIRECTION", "KEY_ROTATE_DISPLAY"]),
    (244, &["KEY_BRIGHTNESS_AUTO", "KEY_BRIGHTNESS_ZERO"]),
    (246, &["KEY_WIMAX", "KEY_WWAN"]),
    (0x100, &["BTN_0", "BTN_MISC"]),
    (0x110, &["BTN_LEFT", "BTN_MOUSE"]),
    (0x120, &["BTN_JOYSTICK", "BTN_TRIGGER"]),
    (0x130, &["BTN_A", "BTN_GAMEPAD", "BTN_SOUTH"]),
    (0x131, &["BTN_B", "BTN_EAST"]),
    (0x133, &["BTN_NORTH", "BTN_X"]),
    (0x134, &["BTN_WEST", "BTN_Y"]),
    (0x140, &["BTN_DIGI", "BTN_TOOL_PEN"]),
    (0x150, &["BTN_GEAR_DOWN", "BTN_WHEEL"]),
    (0x174, &["KEY_FULL_SCREEN", "KEY_ZOOM"]),
    (0x177, &["KEY_ASPECT_RATIO", "KEY_SCREEN"]),
    (0x1af, &["KEY_BRIGHTNESS_TOGGLE", "KEY_DISPLAYTOGGLE"]),
    (0x2c0, &["BTN_TRIGGER_HAPPY", "BTN_TRIGGER_HAPPY1"]),
];

/// Returns every name of `code` when the kernel defines more than one.
pub fn aliases_for(code: u16) -> Option<&'static [&'static str]> {
    KEYCODE_ALIASES
        .binary_search_by_key(&code, |&(c, _)| c)
        .ok()
        .map(|idx| KEYCODE_ALIASES[idx].1)
}
