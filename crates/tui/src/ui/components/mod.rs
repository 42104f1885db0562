pub mod card;
pub mod charts;
pub mod labels;
pub mod money;
pub mod tabs;
