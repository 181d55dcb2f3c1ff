use std::collections::HashSet;

use futures_util::future::join_all;
use log::{info, warn};

use crate::client::services::api_client::ApiError;
use crate::client::services::session::Session;
use crate::client::services::users_service::UsersService;
use crate::common::models::{
    FriendRequest, Friendship, FriendshipAction, FriendshipUpdate, PendingRequest, UserProfile,
};

#[derive(Debug, Default)]
pub struct FriendsService;

impl FriendsService {
    /// Accepted friends as full user records.
    pub async fn friends(session: &Session) -> Result<Vec<UserProfile>, ApiError> {
        session.api().get_json("/api/friendships/friends-users").await
    }

    pub async fn pending(session: &Session) -> Result<Vec<Friendship>, ApiError> {
        session.api().get_json("/api/friendships/pending").await
    }

    pub async fn send_request(session: &Session, to_user_id: i64) -> Result<(), ApiError> {
        session.api().post("/api/friendships", &FriendRequest { to_user_id }).await?;
        info!("[FRIENDS] Friend request sent to {}", to_user_id);
        Ok(())
    }

    pub async fn respond(
        session: &Session,
        friendship_id: i64,
        action: FriendshipAction,
    ) -> Result<Friendship, ApiError> {
        session
            .api()
            .put_json(&format!("/api/friendships/{}", friendship_id), &FriendshipUpdate { action })
            .await
    }

    /// Pending requests with the other participant attached. A user lookup
    /// that fails leaves that row without a user instead of failing the list.
    pub async fn pending_with_users(session: &Session) -> Result<Vec<PendingRequest>, ApiError> {
        let my_id = session.my_id().await?;
        let pending = Self::pending(session).await?;
        let enriched = join_all(pending.into_iter().map(|friendship| async move {
            let other_id = friendship.other_user_id(my_id);
            let other_user = match UsersService::get(session, other_id).await {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("[FRIENDS] Failed to fetch user {} for friendship {}: {}", other_id, friendship.id, e);
                    None
                }
            };
            PendingRequest { friendship, other_user }
        }))
        .await;
        Ok(enriched)
    }

    /// Everyone who is not me, not already a friend, and has no pending
    /// request with me in either direction.
    pub async fn candidates(session: &Session) -> Result<Vec<UserProfile>, ApiError> {
        let me = session.profile().await?;
        let all = UsersService::list_all(session).await?;

        let friend_ids: HashSet<i64> = match Self::friends(session).await {
            Ok(friends) => friends.iter().map(|u| u.user_id).collect(),
            Err(e) => {
                warn!("[FRIENDS] Friends list unavailable, not filtering on it: {}", e);
                HashSet::new()
            }
        };
        let pending_ids: HashSet<i64> = match Self::pending(session).await {
            Ok(pending) => pending.iter().map(|f| f.other_user_id(me.user_id)).collect(),
            Err(e) => {
                warn!("[FRIENDS] Pending list unavailable, not filtering on it: {}", e);
                HashSet::new()
            }
        };

        Ok(all
            .into_iter()
            .filter(|u| u.user_id != me.user_id && !friend_ids.contains(&u.user_id) && !pending_ids.contains(&u.user_id))
            .collect())
    }
}
