/*
[INPUT]:  Steam ids and query options
[OUTPUT]: Owned and recently played games
[POS]:    HTTP layer - IPlayerService Web API endpoints
[UPDATE]: When adding PlayerService methods or changing response format
*/

use crate::http::{ParameterKind, Result, SteamClient, SteamRequest, block_on};
use crate::types::{
    GetOwnedGamesResponse, GetRecentlyPlayedGamesResponse, MethodVersion, OwnedGames,
    PlayedGames, SteamId, SteamInterface,
};

impl SteamClient {
    /// Games owned by a player, if the profile is publicly visible
    ///
    /// GET IPlayerService/GetOwnedGames/v0001/?steamid={steam_id}&include_appinfo=..&include_played_free_games=..
    pub async fn get_owned_games(
        &self,
        steam_id: SteamId,
        include_app_info: bool,
        include_played_free_games: bool,
    ) -> Result<OwnedGames> {
        let mut request = SteamRequest::for_interface(
            SteamInterface::PlayerService,
            "GetOwnedGames",
            MethodVersion::V0001,
        );
        request
            .add_parameter("steamid", steam_id, ParameterKind::QueryString)
            .add_parameter("include_appinfo", u8::from(include_app_info), ParameterKind::QueryString)
            .add_parameter(
                "include_played_free_games",
                u8::from(include_played_free_games),
                ParameterKind::QueryString,
            );

        let response = self.execute(&mut request).await?;
        let owned: GetOwnedGamesResponse = response.verify_and_deserialize()?;
        Ok(owned.response)
    }

    pub fn get_owned_games_blocking(
        &self,
        steam_id: SteamId,
        include_app_info: bool,
        include_played_free_games: bool,
    ) -> Result<OwnedGames> {
        block_on(self.get_owned_games(steam_id, include_app_info, include_played_free_games))
    }

    /// Games played in the last two weeks, at most `max_count` when given
    ///
    /// GET IPlayerService/GetRecentlyPlayedGames/v0001/?steamid={steam_id}[&count={max_count}]
    pub async fn get_recently_played_games(
        &self,
        steam_id: SteamId,
        max_count: Option<u32>,
    ) -> Result<PlayedGames> {
        let mut request = SteamRequest::for_interface(
            SteamInterface::PlayerService,
            "GetRecentlyPlayedGames",
            MethodVersion::V0001,
        );
        request.add_parameter("steamid", steam_id, ParameterKind::QueryString);
        if let Some(count) = max_count.filter(|count| *count > 0) {
            request.add_parameter("count", count, ParameterKind::QueryString);
        }

        let response = self.execute(&mut request).await?;
        let played: GetRecentlyPlayedGamesResponse = response.verify_and_deserialize()?;
        Ok(played.response)
    }

    pub fn get_recently_played_games_blocking(
        &self,
        steam_id: SteamId,
        max_count: Option<u32>,
    ) -> Result<PlayedGames> {
        block_on(self.get_recently_played_games(steam_id, max_count))
    }
}
