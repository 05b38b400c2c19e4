pub mod controls;
pub mod helpers;
pub mod menu_bar;
pub mod plots;
pub mod roi_interaction;
pub mod status;
pub mod viewport;
