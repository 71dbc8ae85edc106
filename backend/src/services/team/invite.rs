use crate::collaborators::notifier::deliver;
use crate::error::AppError;
use crate::services::identity::Owner;
use crate::state::{new_token, AppState};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::{SubsecRound, Utc};
use common::model::team::TeamInvite;
use common::model::testimonial::looks_like_email;
use common::requests::{Delivery, InviteRequest};
use log::info;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
struct Invited {
    invite: TeamInvite,
    notification: Delivery,
}

pub async fn process(
    owner: Owner,
    state: web::Data<AppState>,
    payload: web::Json<InviteRequest>,
) -> impl Responder {
    match invite_member(&state, owner.id(), payload.into_inner()).await {
        Ok((invite, notification)) => {
            HttpResponse::Created().json(Invited { invite, notification })
        }
        Err(e) => e.error_response(),
    }
}

pub async fn list(owner: Owner, state: web::Data<AppState>) -> impl Responder {
    match state.store.list_invites(owner.id()) {
        Ok(invites) => HttpResponse::Ok().json(invites),
        Err(e) => AppError::from(e).error_response(),
    }
}

/// Stores the invite before sending it. A failed send is reported, not fatal.
pub async fn invite_member(
    state: &AppState,
    owner_id: &str,
    request: InviteRequest,
) -> Result<(TeamInvite, Delivery), AppError> {
    let email = request.email.trim().to_lowercase();
    if !looks_like_email(&email) {
        return Err(AppError::Validation(format!(
            "'{}' is not an email address",
            request.email
        )));
    }

    let invite = TeamInvite {
        id: Uuid::new_v4().to_string(),
        owner_id: owner_id.to_string(),
        email,
        role: request.role,
        created_at: Utc::now().trunc_subsecs(6),
        token: new_token(),
    };
    state.store.insert_invite(&invite)?;
    info!(
        "owner {} invited {} as {}",
        owner_id,
        invite.email,
        invite.role.as_str()
    );

    let link = state.invite_link(&invite.token);
    let notification = deliver(
        &format!("invite {}", invite.id),
        state
            .notifier
            .send_team_invite(&invite.email, invite.role, &link),
    )
    .await;

    Ok((invite, notification))
}
