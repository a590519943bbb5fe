quantity!(
    /// Battery capacity, raw or rate-weighted.
    KilowattHours,
    suffix: "kWh"
);
