//! Proxy registry example.
//!
//! Registers a toy scheme next to the built-in `direct` one and dials
//! through both.

use dialnet::socket::{DialerRegistry, Network, Proxy, SharedDialer};
use std::env;
use url::Url;

#[tokio::main]
async fn main() {
    let target = env::args().nth(1).unwrap_or_else(|| "example.com:80".to_string());

    // A "loopback" scheme that simply reuses the forwarding dialer
    DialerRegistry::global().register("loopback", |_url: &Url, forward: SharedDialer| Ok(forward));
    println!("Registered schemes: {:?}", DialerRegistry::global().schemes());

    for raw in ["direct://", "loopback://anything", "socks5://127.0.0.1:1080"] {
        match Proxy::from_url(raw) {
            Ok(proxy) => match proxy.dial(Network::Tcp, &target).await {
                Ok(socket) => println!("{proxy}: connected to {:?}", socket.peer_addr()),
                Err(e) => println!("{proxy}: dial failed: {e}"),
            },
            Err(e) => println!("{raw}: {e} (code {})", e.as_i32()),
        }
    }
}
