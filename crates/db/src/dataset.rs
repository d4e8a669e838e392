use serde::{Deserialize, Serialize};
use siwes_core::assignment::Assignment;
use siwes_core::identity::Identity;
use siwes_core::message::Message;
use siwes_core::organization::Organization;
use siwes_core::report::Report;

/// Every collection the portal reads. Also the JSON seed file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub identities: Vec<Identity>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}
