//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements   | Connects to            |
//! |-----------------|--------------|------------------------|
//! | `config_file`   | ConfigPort   | JSON file on disk      |
//! | `log_sink`      | EventSink    | `log` facade           |
//! | `tcp_transport` | Transport    | `std::net::TcpStream`  |
//! | `time`          | Clock        | OS sleep / `Instant`   |

pub mod config_file;
pub mod log_sink;
pub mod tcp_transport;
pub mod time;
