/// iTerm2 color key -> Terminal.app color key.
pub const COLOR_KEY_MAP: [(&str, &str); 21] = [
    ("Ansi 0 Color", "ANSIBlackColor"),
    ("Ansi 1 Color", "ANSIRedColor"),
    ("Ansi 2 Color", "ANSIGreenColor"),
    ("Ansi 3 Color", "ANSIYellowColor"),
    ("Ansi 4 Color", "ANSIBlueColor"),
    ("Ansi 5 Color", "ANSIMagentaColor"),
    ("Ansi 6 Color", "ANSICyanColor"),
    ("Ansi 7 Color", "ANSIWhiteColor"),
    ("Ansi 8 Color", "ANSIBrightBlackColor"),
    ("Ansi 9 Color", "ANSIBrightRedColor"),
    ("Ansi 10 Color", "ANSIBrightGreenColor"),
    ("Ansi 11 Color", "ANSIBrightYellowColor"),
    ("Ansi 12 Color", "ANSIBrightBlueColor"),
    ("Ansi 13 Color", "ANSIBrightMagentaColor"),
    ("Ansi 14 Color", "ANSIBrightCyanColor"),
    ("Ansi 15 Color", "ANSIBrightWhiteColor"),
    ("Background Color", "BackgroundColor"),
    ("Foreground Color", "TextColor"),
    ("Selection Color", "SelectionColor"),
    ("Bold Color", "BoldTextColor"),
    ("Cursor Color", "CursorColor"),
];

/// Look up the Terminal.app key for an iTerm2 color key. Exact, case-sensitive match.
pub fn terminal_key(iterm_key: &str) -> Option<&'static str> {
    COLOR_KEY_MAP
        .iter()
        .find(|(src, _)| *src == iterm_key)
        .map(|(_, dest)| *dest)
}
