use crate::quantity::energy::KilowattHours;

quantity!(
    /// Small-scale technology certificates, fractional until rounded for output.
    Certificates,
    suffix: "STC"
);

quantity!(
    /// Certificates created per weighted kilowatt-hour of usable capacity.
    CertificateFactor,
    suffix: "STC/kWh"
);

implement_mul!(KilowattHours, CertificateFactor, Certificates);
