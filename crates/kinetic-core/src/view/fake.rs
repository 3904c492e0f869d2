// Scripted `DeviceService` for view tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use kinetic_api::{Command, CommandResponse, Device, Error, Metric, TimeRange};

use crate::service::DeviceService;

#[derive(Debug, Default)]
pub(crate) struct FakeService {
    pub devices: Vec<Device>,
    pub metrics: Vec<Metric>,
    pub fail_status: Option<u16>,
    pub list_calls: AtomicUsize,
    pub metric_calls: AtomicUsize,
    pub last_range: Mutex<Option<TimeRange>>,
}

impl FakeService {
    fn fail<T>(&self) -> Result<T, Error> {
        Err(Error::Http {
            status: self.fail_status.unwrap_or(500),
            body: "boom".into(),
        })
    }
}

impl DeviceService for FakeService {
    async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_status.is_some() {
            return self.fail();
        }
        Ok(self.devices.clone())
    }

    async fn get_device(&self, device_id: &str) -> Result<Device, Error> {
        self.devices
            .iter()
            .find(|d| d.id == device_id)
            .cloned()
            .map_or_else(|| self.fail(), Ok)
    }

    async fn get_device_metrics(
        &self,
        _device_id: &str,
        range: Option<&TimeRange>,
    ) -> Result<Vec<Metric>, Error> {
        self.metric_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_range.lock() {
            *last = range.copied();
        }
        if self.fail_status.is_some() {
            return self.fail();
        }
        Ok(self.metrics.clone())
    }

    async fn send_command(
        &self,
        _device_id: &str,
        _command: &Command,
    ) -> Result<CommandResponse, Error> {
        Ok(CommandResponse {
            success: true,
            message: None,
            data: None,
        })
    }
}

pub(crate) fn device(id: &str) -> Device {
    Device {
        id: id.into(),
        name: Some(format!("Device {id}")),
        status: "Active".into(),
        connection_state: "Open".into(),
        ..Device::default()
    }
}

pub(crate) fn metric(metric_type: &str, value: f64) -> Metric {
    Metric {
        device_id: "100-1".into(),
        timestamp: "2024-01-01T00:00:00Z".into(),
        metric_type: metric_type.into(),
        value,
        unit: "C".into(),
    }
}
