pub mod catalog;
pub mod collection;
pub mod content;
pub mod economy;
pub mod gacha;
pub mod game;
pub mod images;
