// Copyright 2025 PRAGMA
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Feeding the fork registry from the network.
//!
//! A [`BlockSource`] yields announced blocks for as long as its connection lasts; the
//! [`StreamPump`] keeps (re)connecting it forever and hands every block to the registry.

mod chain_sync;
pub use chain_sync::*;

mod connectivity;
pub use connectivity::*;

mod pump;
pub use pump::*;

mod source;
pub use source::*;
