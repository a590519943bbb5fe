use crate::quantity::certificates::Certificates;

quantity!(
    /// Australian dollars.
    Aud,
    suffix: "AUD"
);

quantity!(
    /// Trading price of one certificate, excluding GST.
    AudPerCertificate,
    suffix: "AUD/STC"
);

implement_mul!(Certificates, AudPerCertificate, Aud);

impl AudPerCertificate {
    pub const DEFAULT: Self = Self(40.0);
}
