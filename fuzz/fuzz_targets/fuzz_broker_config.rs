#![no_main]

use fleet_session_broker::BrokerConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = serde_json::from_slice::<BrokerConfig>(data) {
        let _ = config.validate();
        let _ = config.resolved_endpoint();
        let _ = config.request_timeout();
    }
});
