pub mod stuck_sessions;
