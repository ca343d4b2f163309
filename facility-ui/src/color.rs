use iced::Color;
pub const GREY_3: Color = Color::from_rgb(
    0x71 as f32 / 255.0,
    0x71 as f32 / 255.0,
    0x71 as f32 / 255.0,
);
pub const RED: Color = Color::from_rgb(
    0xE2 as f32 / 255.0,
    0x4B as f32 / 255.0,
    0x4B as f32 / 255.0,
);
