pub mod session_resolver;
