pub mod alert;
pub mod chart;
pub mod command;
pub mod history;
pub mod position;
pub mod price;
pub mod settings;
pub mod summary;
pub mod symbol;
pub mod view;
