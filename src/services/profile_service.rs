use crate::database::Store;
use crate::models::{
    new_id, non_empty, now_millis, split_skills, Education, EducationRequest, Experience,
    ExperienceRequest, Profile, ProfileRequest, ProfileResponse, UserSummary,
};
use crate::utils::{AppError, StoreError};
use crate::validation::{
    parse_date, validate_education, validate_experience, validate_profile, FieldErrors,
};

fn no_profile() -> AppError {
    AppError::not_found("noProfile", "There is no profile for this user")
}

fn handle_taken() -> AppError {
    AppError::conflict("handle", "That handle already exists")
}

/// Attaches `{_id, name, avatar}` of the owning user.
async fn populate(db: &dyn Store, profile: Profile) -> Result<ProfileResponse, AppError> {
    let user = db.find_user_by_id(&profile.user).await?;
    let summary = UserSummary::new(&profile.user, user.as_ref());
    Ok(ProfileResponse::new(profile, summary))
}

async fn load_own(db: &dyn Store, user_id: &str) -> Result<Profile, AppError> {
    db.find_profile_by_user(user_id).await?.ok_or_else(no_profile)
}

async fn save(db: &dyn Store, profile: Profile) -> Result<ProfileResponse, AppError> {
    match db.replace_profile(&profile).await {
        Ok(true) => populate(db, profile).await,
        Ok(false) => Err(no_profile()),
        Err(StoreError::Duplicate(_)) => Err(handle_taken()),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_current_profile(db: &dyn Store, user_id: &str) -> Result<ProfileResponse, AppError> {
    let profile = load_own(db, user_id).await?;
    populate(db, profile).await
}

pub async fn get_profile_by_user(db: &dyn Store, user_id: &str) -> Result<ProfileResponse, AppError> {
    let profile = db.find_profile_by_user(user_id).await?.ok_or_else(no_profile)?;
    populate(db, profile).await
}

pub async fn get_profile_by_handle(db: &dyn Store, handle: &str) -> Result<ProfileResponse, AppError> {
    let profile = db.find_profile_by_handle(handle).await?.ok_or_else(no_profile)?;
    populate(db, profile).await
}

pub async fn get_all_profiles(db: &dyn Store) -> Result<Vec<ProfileResponse>, AppError> {
    let profiles = db.list_profiles().await?;
    if profiles.is_empty() {
        return Err(AppError::not_found("noProfile", "There are no profiles"));
    }

    let mut populated = Vec::with_capacity(profiles.len());
    for profile in profiles {
        populated.push(populate(db, profile).await?);
    }
    Ok(populated)
}

/// Create-or-update keyed by the caller. Blank optional fields leave stored
/// values untouched; the social links are replaced as a whole.
pub async fn upsert_profile(
    db: &dyn Store,
    user_id: &str,
    request: ProfileRequest,
) -> Result<ProfileResponse, AppError> {
    validate_profile(&request).into_result()?;

    let handle = request.handle.trim().to_string();
    let owner_of_handle = db.find_profile_by_handle(&handle).await?;

    match db.find_profile_by_user(user_id).await? {
        Some(mut profile) => {
            if owner_of_handle.is_some_and(|other| other.user != user_id) {
                return Err(handle_taken());
            }

            profile.handle = handle;
            profile.status = request.status.trim().to_string();
            profile.skills = split_skills(&request.skills);
            profile.social = request.social();
            let optional = [
                (&mut profile.company, &request.company),
                (&mut profile.website, &request.website),
                (&mut profile.location, &request.location),
                (&mut profile.bio, &request.bio),
                (&mut profile.githubusername, &request.githubusername),
            ];
            for (slot, value) in optional {
                if let Some(value) = non_empty(value) {
                    *slot = Some(value);
                }
            }

            log::info!("✏️  Updating profile '{}' for user {}", profile.handle, user_id);
            save(db, profile).await
        }
        None => {
            if owner_of_handle.is_some() {
                return Err(handle_taken());
            }

            let profile = Profile {
                id: new_id(),
                user: user_id.to_string(),
                handle,
                company: non_empty(&request.company),
                website: non_empty(&request.website),
                location: non_empty(&request.location),
                status: request.status.trim().to_string(),
                skills: split_skills(&request.skills),
                bio: non_empty(&request.bio),
                githubusername: non_empty(&request.githubusername),
                social: request.social(),
                experience: vec![],
                education: vec![],
                date: now_millis(),
            };

            match db.insert_profile(&profile).await {
                Ok(()) => {}
                Err(StoreError::Duplicate(field)) if field == "handle" => return Err(handle_taken()),
                Err(StoreError::Duplicate(_)) => {
                    return Err(AppError::conflict("profile", "Profile already exists for this user"));
                }
                Err(e) => return Err(e.into()),
            }

            log::info!("✅ Profile '{}' created for user {}", profile.handle, user_id);
            populate(db, profile).await
        }
    }
}

/// Parses the validated `from`/`to` pair; `to` is dropped for current entries.
fn entry_dates(
    from: &str,
    to: &str,
    current: bool,
) -> Result<(chrono::NaiveDate, Option<chrono::NaiveDate>), AppError> {
    let from = parse_date(from)
        .ok_or_else(|| AppError::Validation(FieldErrors::single("from", "From date is invalid")))?;
    let to = if current { None } else { parse_date(to) };
    Ok((from, to))
}

pub async fn add_experience(
    db: &dyn Store,
    user_id: &str,
    request: ExperienceRequest,
) -> Result<ProfileResponse, AppError> {
    validate_experience(&request).into_result()?;
    let mut profile = load_own(db, user_id).await?;

    let (from, to) = entry_dates(&request.from, &request.to, request.current)?;
    let entry = Experience {
        id: new_id(),
        title: request.title.trim().to_string(),
        company: request.company.trim().to_string(),
        location: non_empty(&request.location),
        from,
        to,
        current: request.current,
        description: non_empty(&request.description),
    };

    // newest entry first
    profile.experience.insert(0, entry);
    save(db, profile).await
}

pub async fn delete_experience(
    db: &dyn Store,
    user_id: &str,
    exp_id: &str,
) -> Result<ProfileResponse, AppError> {
    let mut profile = load_own(db, user_id).await?;

    let index = profile
        .experience
        .iter()
        .position(|entry| entry.id == exp_id)
        .ok_or_else(|| AppError::not_found("experienceNotFound", "Experience not found"))?;
    profile.experience.remove(index);

    save(db, profile).await
}

pub async fn add_education(
    db: &dyn Store,
    user_id: &str,
    request: EducationRequest,
) -> Result<ProfileResponse, AppError> {
    validate_education(&request).into_result()?;
    let mut profile = load_own(db, user_id).await?;

    let (from, to) = entry_dates(&request.from, &request.to, request.current)?;
    let entry = Education {
        id: new_id(),
        school: request.school.trim().to_string(),
        degree: request.degree.trim().to_string(),
        fieldofstudy: request.fieldofstudy.trim().to_string(),
        from,
        to,
        current: request.current,
        description: non_empty(&request.description),
    };

    profile.education.insert(0, entry);
    save(db, profile).await
}

pub async fn delete_education(
    db: &dyn Store,
    user_id: &str,
    education_id: &str,
) -> Result<ProfileResponse, AppError> {
    let mut profile = load_own(db, user_id).await?;

    let index = profile
        .education
        .iter()
        .position(|entry| entry.id == education_id)
        .ok_or_else(|| AppError::not_found("educationNotFound", "Education not found"))?;
    profile.education.remove(index);

    save(db, profile).await
}
