//! Option lists a formatting toolbar offers for the root fonts.

/// Sizes offered by the font size picker.
pub const FONT_SIZES: [&str; 13] = [
    "10px", "11px", "12px", "14px", "16px", "18px", "20px", "24px", "28px", "32px", "36px",
    "48px", "72px",
];

/// Families offered by the font family picker.
pub const FONT_FAMILIES: [&str; 9] = [
    "Arial",
    "Calibri",
    "Comic Sans MS",
    "Courier New",
    "Georgia",
    "Impact",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
];
