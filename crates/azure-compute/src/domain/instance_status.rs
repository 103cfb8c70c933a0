//! Role instance lifecycle states.

use crate::domain::wire::wire_enum;

wire_enum! {
    /// Status of a role instance as reported by the host agent.
    ///
    /// Tokens that are not listed here decode to [`InstanceStatus::RoleStateUnknown`].
    pub enum InstanceStatus {
        /// The role state is not known yet; it resolves once detected.
        RoleStateUnknown => "ROLE_STATE_UNKNOWN",
        /// The host agent is creating resources for the virtual machine.
        CreatingVm => "CREATING_V_M",
        /// The host agent is starting the virtual machine.
        StartingVm => "STARTING_V_M",
        /// Resources for the role are being created.
        CreatingRole => "CREATING_ROLE",
        /// The role is starting.
        StartingRole => "STARTING_ROLE",
        /// The role instance has started and is ready to be used.
        ReadyRole => "READY_ROLE",
        /// The role instance is unavailable for requests, usually while it is
        /// created or stopped.
        BusyRole => "BUSY_ROLE",
        /// The role is stopping.
        StoppingRole => "STOPPING_ROLE",
        /// The host agent is stopping the virtual machine; the role has
        /// already been stopped.
        StoppingVm => "STOPPING_V_M",
        /// The host agent is deleting the virtual machine.
        DeletingVm => "DELETING_V_M",
        /// The virtual machine is not running. Final state of a shutdown.
        StoppedVm => "STOPPED_V_M",
        /// The role stopped unexpectedly or failed to start.
        RestartingRole => "RESTARTING_ROLE",
        /// The role keeps crashing after being started.
        CyclingRole => "CYCLING_ROLE",
        /// The role keeps failing to start.
        FailedStartingRole => "FAILED_STARTING_ROLE",
        /// A platform or container error prevents the virtual machine from starting.
        FailedStartingVm => "FAILED_STARTING_V_M",
        /// The role timed out before reporting status and does not respond.
        UnresponsiveRole => "UNRESPONSIVE_ROLE",
        /// Undocumented, observed while a deployment is provisioned.
        Provisioning => "PROVISIONING",
    }
    fallback = RoleStateUnknown;
}

impl InstanceStatus {
    /// Returns true once the role instance can serve requests.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::ReadyRole)
    }

    /// Returns true for states that need operator attention.
    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(
            self,
            Self::CyclingRole
                | Self::FailedStartingRole
                | Self::FailedStartingVm
                | Self::UnresponsiveRole
        )
    }
}
