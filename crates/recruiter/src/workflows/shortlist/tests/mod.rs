mod common;

mod routing;
mod status;
