//! Read-only reference data: tasks, profile, quota, dictionaries.

use serde_json::Value;
use uuid::Uuid;

use rapi_shared::{Dictionary, Profile, ProfileQuota, Task};

use crate::client::Client;
use crate::error::Result;
use crate::transport::{Method, Transport};

impl<T: Transport> Client<T> {
    /// Report types the account may submit.
    pub async fn get_tasks(&self) -> Result<Vec<Task>> {
        self.fetch_list(self.request(Method::Get, "/tasks")).await
    }

    pub async fn get_profile(&self) -> Result<Profile> {
        self.fetch("/profile").await
    }

    pub async fn get_profile_quota(&self) -> Result<ProfileQuota> {
        self.fetch("/profile/quota").await
    }

    pub async fn get_dictionaries(&self) -> Result<Vec<Dictionary>> {
        self.fetch_list(self.request(Method::Get, "/dictionaries")).await
    }

    /// Contents of one dictionary. The shape is server-defined, so it is
    /// returned as plain JSON.
    pub async fn get_dictionary(&self, id: Uuid) -> Result<Value> {
        self.fetch(&format!("/dictionaries/{id}")).await
    }
}
