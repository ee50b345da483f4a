mod helpers;
mod json_store;
mod tick_flow;
mod weekday_text;
