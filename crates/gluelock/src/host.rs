// A host that reports characteristic updates through the log.

use tracing::info;

use gluelock_core::{AccessoryHost, Characteristic, CharacteristicValue};

pub struct LoggingHost {
    name: String,
}

impl LoggingHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AccessoryHost for LoggingHost {
    fn set_characteristic(&self, characteristic: Characteristic, value: CharacteristicValue) {
        info!(
            accessory = %self.name,
            %characteristic,
            value = value.host_value(),
            "{characteristic} -> {value:?}"
        );
    }
}
