// ── Service seam ──
//
// Views talk to the backend only through `DeviceService`, so the
// composition root can hand them the real client and tests can hand them
// a fake.

use std::future::Future;

use kinetic_api::{Command, CommandResponse, Device, Error, KineticClient, Metric, TimeRange};

/// The backend operations the views depend on.
///
/// Errors are the API crate's, unchanged.
pub trait DeviceService: Send + Sync + 'static {
    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, Error>> + Send;

    fn get_device(&self, device_id: &str) -> impl Future<Output = Result<Device, Error>> + Send;

    fn get_device_metrics(
        &self,
        device_id: &str,
        range: Option<&TimeRange>,
    ) -> impl Future<Output = Result<Vec<Metric>, Error>> + Send;

    fn send_command(
        &self,
        device_id: &str,
        command: &Command,
    ) -> impl Future<Output = Result<CommandResponse, Error>> + Send;
}

impl DeviceService for KineticClient {
    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, Error>> + Send {
        KineticClient::list_devices(self)
    }

    fn get_device(&self, device_id: &str) -> impl Future<Output = Result<Device, Error>> + Send {
        KineticClient::get_device(self, device_id)
    }

    fn get_device_metrics(
        &self,
        device_id: &str,
        range: Option<&TimeRange>,
    ) -> impl Future<Output = Result<Vec<Metric>, Error>> + Send {
        KineticClient::get_device_metrics(self, device_id, range)
    }

    fn send_command(
        &self,
        device_id: &str,
        command: &Command,
    ) -> impl Future<Output = Result<CommandResponse, Error>> + Send {
        KineticClient::send_command(self, device_id, command)
    }
}
